// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Gateway Configuration Types
//
// Defines the configuration schema for clarity gateway hosts, including:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - HTTP listener settings
// - Analyzer subprocess command, arguments and timeout
// - Storage backend selection (in-memory or PostgreSQL)
// - Logging settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::repository::StorageBackend;

/// Top-level Kubernetes-style gateway configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// API version (must be "100monkeys.ai/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "GatewayConfig")
    pub kind: String,

    /// Gateway metadata (name, version)
    pub metadata: ManifestMetadata,

    /// Gateway configuration specification
    pub spec: GatewaySpec,
}

/// Manifest metadata (Kubernetes-style)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Human-readable gateway name
    pub name: String,

    /// Optional: Configuration version for tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Gateway configuration specification (content under spec:)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySpec {
    /// HTTP listener settings
    #[serde(default)]
    pub network: NetworkConfig,

    /// Analyzer subprocess settings
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Storage backend selection
    #[serde(default)]
    pub storage: StorageBackend,

    /// Upper bound on a single store write, in seconds
    #[serde(default = "default_store_timeout")]
    pub store_timeout_secs: u64,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Bind address for the HTTP API
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP API port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            api_port: default_api_port(),
        }
    }
}

/// Analyzer subprocess settings.
///
/// The command is a fixed program plus argument vector; the policy text is
/// delivered on the child's stdin and is never part of the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Program to execute (e.g., "python3")
    #[serde(default = "default_analyzer_program")]
    pub program: String,

    /// Fixed argument vector passed to the program
    #[serde(default = "default_analyzer_args")]
    pub args: Vec<String>,

    /// Upper bound on a single analyzer run, in seconds
    #[serde(default = "default_analyzer_timeout")]
    pub timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            program: default_analyzer_program(),
            args: default_analyzer_args(),
            timeout_secs: default_analyzer_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    5000
}

fn default_analyzer_program() -> String {
    "python3".to_string()
}

fn default_analyzer_args() -> Vec<String> {
    vec!["-m".to_string(), "orchestrator".to_string()]
}

fn default_analyzer_timeout() -> u64 {
    30
}

fn default_store_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GatewaySpec {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            analyzer: AnalyzerConfig::default(),
            storage: StorageBackend::default(),
            store_timeout_secs: default_store_timeout(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_version: "100monkeys.ai/v1".to_string(),
            kind: "GatewayConfig".to_string(),
            metadata: ManifestMetadata {
                name: "clarity-gateway".to_string(),
                version: None,
            },
            spec: GatewaySpec::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. CLARITY_CONFIG_PATH environment variable
    /// 2. ./clarity-gateway.yaml (working directory)
    /// 3. /etc/clarity-gateway/config.yaml (system, Unix)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("CLARITY_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./clarity-gateway.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        #[cfg(unix)]
        {
            let system_config = PathBuf::from("/etc/clarity-gateway/config.yaml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // 1. Explicit CLI path (fail if missing/invalid)
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        // 2. Discovery (Env -> Cwd -> System)
        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    /// This allows container deployments to override config via env vars
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CLARITY_DATABASE_URL") {
            tracing::info!("Environment override: CLARITY_DATABASE_URL set, using PostgreSQL backend");
            self.spec.storage = StorageBackend::Postgres(crate::domain::repository::PostgresConfig {
                connection_string: url,
            });
        }

        if let Ok(program) = std::env::var("CLARITY_ANALYZER_PROGRAM") {
            tracing::info!("Environment override: CLARITY_ANALYZER_PROGRAM={}", program);
            self.spec.analyzer.program = program;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != "100monkeys.ai/v1" {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '100monkeys.ai/v1'",
                self.api_version
            );
        }

        if self.kind != "GatewayConfig" {
            anyhow::bail!("Invalid kind: '{}'. Must be 'GatewayConfig'", self.kind);
        }

        if self.metadata.name.trim().is_empty() {
            anyhow::bail!("metadata.name must not be empty");
        }

        if self.spec.analyzer.program.trim().is_empty() {
            anyhow::bail!("spec.analyzer.program must not be empty");
        }

        if self.spec.analyzer.timeout_secs == 0 {
            anyhow::bail!("spec.analyzer.timeout_secs must be greater than zero");
        }

        if let StorageBackend::Postgres(pg) = &self.spec.storage {
            if pg.connection_string.trim().is_empty() {
                anyhow::bail!("spec.storage.connection_string must not be empty");
            }
        }

        Ok(())
    }
}
