// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Subprocess-backed `ClarityAnalyzer`.
//!
//! The analyzer is launched as an isolated child process from a fixed
//! program and argument vector. The policy text travels over the child's
//! stdin and the JSON document comes back on stdout. The text never touches
//! a shell and is never concatenated into a command line, so quote and
//! metacharacter sequences in it stay inert data.

use crate::domain::analyzer::{AnalyzerError, ClarityAnalyzer};
use crate::domain::gateway_config::AnalyzerConfig;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

pub struct SubprocessAnalyzer {
    config: AnalyzerConfig,
}

impl SubprocessAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ClarityAnalyzer for SubprocessAnalyzer {
    async fn run_clarity(&self, policy_text: &str) -> Result<String, AnalyzerError> {
        debug!(
            program = %self.config.program,
            timeout_secs = self.config.timeout_secs,
            "Spawning analyzer"
        );

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AnalyzerError::SpawnFailed(e.to_string()))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AnalyzerError::SpawnFailed("stdin not captured".to_string()))?;

        // Feed the text concurrently with collecting output so neither pipe
        // can fill up and deadlock the child. A broken pipe here just means
        // the child exited without reading; its exit status governs.
        let text = policy_text.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            let _ = stdin.write_all(&text).await;
            let _ = stdin.shutdown().await;
        });

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            // Dropping the unfinished future drops the child, and
            // kill_on_drop reaps it.
            Err(_) => {
                writer.abort();
                return Err(AnalyzerError::Timeout(self.config.timeout_secs));
            }
            Ok(result) => {
                let _ = writer.await;
                result.map_err(|e| AnalyzerError::SpawnFailed(e.to_string()))?
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return match output.status.code() {
                Some(code) => Err(AnalyzerError::NonZeroExit { code, stderr }),
                None => Err(AnalyzerError::Killed(output.status.to_string())),
            };
        }

        String::from_utf8(output.stdout).map_err(|_| AnalyzerError::InvalidEncoding)
    }
}
