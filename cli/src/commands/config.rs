// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use clarity_gateway_core::domain::gateway_config::GatewayConfig;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./clarity-gateway.yaml)
        #[arg(short, long, default_value = "./clarity-gateway.yaml")]
        output: PathBuf,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate { output } => generate(output).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. {} (explicit)", path.display());
        } else {
            println!("  1. $CLARITY_CONFIG_PATH");
            println!("  2. ./clarity-gateway.yaml");
            println!("  3. /etc/clarity-gateway/config.yaml");
        }
        println!();
    }

    let config = GatewayConfig::load_or_default(config_override)
        .context("Failed to load configuration")?;

    let yaml = serde_yaml::to_string(&config).context("Failed to render configuration")?;
    println!("{}", yaml);

    Ok(())
}

async fn validate(file: Option<PathBuf>) -> Result<()> {
    let config = match file {
        Some(path) => GatewayConfig::from_yaml_file(&path)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        None => GatewayConfig::load_or_default(None).context("Failed to load configuration")?,
    };

    match config.validate() {
        Ok(()) => {
            println!("{}", "Configuration is valid".green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "Configuration is invalid:".red(), e);
            std::process::exit(1);
        }
    }
}

async fn generate(output: PathBuf) -> Result<()> {
    if output.exists() {
        anyhow::bail!("Refusing to overwrite existing file: {}", output.display());
    }

    let config = GatewayConfig::default();
    config
        .to_yaml_file(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {}",
        "Sample configuration written to".green(),
        output.display()
    );

    Ok(())
}
