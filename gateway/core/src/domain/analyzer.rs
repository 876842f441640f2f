// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Analyzer collaborator contract.
//!
//! The clarity analyzer is an external capability: the gateway hands it raw
//! policy text and expects a single JSON document back. The trait is defined
//! here in the domain layer and implemented in
//! `crate::infrastructure::analyzer`, the same seam the repository traits use.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while driving the external analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Failed to launch analyzer: {0}")]
    SpawnFailed(String),

    #[error("Analyzer exited with {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Analyzer terminated by signal: {0}")]
    Killed(String),

    #[error("Analyzer timed out after {0}s")]
    Timeout(u64),

    #[error("Analyzer produced non-UTF-8 output")]
    InvalidEncoding,
}

/// External capability that scores policy text for clarity issues.
///
/// Contract: `run_clarity` receives the caller's text as pure data (never as
/// anything executable) and returns the analyzer's raw standard output on
/// success. The gateway parses and validates that output; implementations
/// must not.
#[async_trait]
pub trait ClarityAnalyzer: Send + Sync {
    async fn run_clarity(&self, policy_text: &str) -> Result<String, AnalyzerError>;
}
