// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Analysis record aggregate.
//!
//! A record is created exactly once per successful analysis and is
//! immutable afterwards: there is no update or delete lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned identifier of a persisted analysis record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One incoming analysis call.
///
/// The text is attacker-controlled. It is treated as data end to end and is
/// never interpreted by a shell or spliced into a command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub policy_text: String,
}

/// The analyzer's output, kept opaque except for the summary contract.
///
/// The gateway relies on a single schema guarantee: the document carries a
/// `summary` object with `critical` and `warnings` members. Their shapes
/// (count, boolean, list) are analyzer-defined and preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(pub serde_json::Value);

impl AnalysisResult {
    /// Validates the summary contract and returns the `critical` and
    /// `warnings` values, or `None` if either is missing.
    pub fn summary(&self) -> Option<(serde_json::Value, serde_json::Value)> {
        let summary = self.0.get("summary")?;
        let critical = summary.get("critical")?.clone();
        let warnings = summary.get("warnings")?.clone();
        Some((critical, warnings))
    }
}

/// Durable representation of one completed analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub policy_text: String,
    pub result: AnalysisResult,
    /// Aggregate `summary.critical` value, denormalized for triage queries.
    pub critical: serde_json::Value,
    /// Aggregate `summary.warnings` value, denormalized for triage queries.
    pub warnings: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Builds a record from validated analyzer output.
    ///
    /// Returns `None` when the summary contract does not hold; callers must
    /// treat that as unparseable analyzer output and persist nothing.
    pub fn from_result(policy_text: String, result: AnalysisResult) -> Option<Self> {
        let (critical, warnings) = result.summary()?;
        Some(Self {
            policy_text,
            result,
            critical,
            warnings,
            created_at: Utc::now(),
        })
    }
}
