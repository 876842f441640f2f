// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! The gateway service: the one `analyze` operation.
//!
//! Control flow per call is strictly linear: validate -> invoke analyzer ->
//! parse -> persist -> respond. Exactly one subprocess invocation and at most
//! one durable write happen per call; there is no caching and no retry (the
//! analyzer is not known to be idempotent).

use crate::domain::analyzer::{AnalyzerError, ClarityAnalyzer};
use crate::domain::record::{AnalysisRecord, AnalysisRequest, AnalysisResult, RecordId};
use crate::domain::repository::{RecordStore, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Failures of a single analyze call, mapped to distinct HTTP statuses in
/// `crate::presentation::api`. None of these are fatal to the process.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("policyText must be a non-empty string")]
    InvalidInput,

    #[error("Analyzer execution failed: {0}")]
    AnalyzerExecution(#[from] AnalyzerError),

    /// The analyzer ran but its output broke the JSON/summary contract.
    /// `raw` carries the unparsed output for diagnosis; it is echoed to the
    /// caller only for this failure kind and is never trusted further.
    #[error("Invalid JSON from analyzer: {message}")]
    AnalyzerOutput { message: String, raw: String },

    #[error("Failed to persist analysis record: {0}")]
    Persistence(#[from] StoreError),
}

/// Outcome of a successful analyze call.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub id: RecordId,
    pub result: AnalysisResult,
}

#[async_trait]
pub trait GatewayService: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, GatewayError>;
}

pub struct StandardGatewayService {
    analyzer: Arc<dyn ClarityAnalyzer>,
    store: Arc<dyn RecordStore>,
    store_timeout: Duration,
}

impl StandardGatewayService {
    pub fn new(
        analyzer: Arc<dyn ClarityAnalyzer>,
        store: Arc<dyn RecordStore>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            analyzer,
            store,
            store_timeout,
        }
    }
}

#[async_trait]
impl GatewayService for StandardGatewayService {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, GatewayError> {
        // 1. Reject empty input before any external call is made
        if request.policy_text.trim().is_empty() {
            return Err(GatewayError::InvalidInput);
        }

        // 2. Invoke the analyzer, passing the text as pure data
        let raw = self.analyzer.run_clarity(&request.policy_text).await?;

        // 3. Parse and validate the summary contract. Nothing is stored for
        //    unparseable or schema-incomplete output.
        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            warn!("Analyzer returned non-JSON output: {}", e);
            GatewayError::AnalyzerOutput {
                message: e.to_string(),
                raw: raw.clone(),
            }
        })?;

        let result = AnalysisResult(value);
        let record = AnalysisRecord::from_result(request.policy_text, result.clone())
            .ok_or_else(|| {
                warn!("Analyzer output is missing summary.critical/summary.warnings");
                GatewayError::AnalyzerOutput {
                    message: "missing summary.critical or summary.warnings".to_string(),
                    raw,
                }
            })?;

        // 4. Persist, fail-closed: no result is returned without a durable
        //    record.
        let id = tokio::time::timeout(self.store_timeout, self.store.add(&record))
            .await
            .map_err(|_| {
                GatewayError::Persistence(StoreError::Timeout(self.store_timeout.as_secs()))
            })??;

        info!(record_id = %id, "Analysis persisted");

        Ok(AnalysisOutcome { id, result })
    }
}
