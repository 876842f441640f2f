// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contract for the analysis record aggregate, following the
//! DDD Repository pattern: interface defined in the domain layer,
//! implemented in `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `RecordStore` | `AnalysisRecord` | `InMemoryRecordStore`, `PostgresRecordStore` |
//!
//! ## Storage Backend Abstraction
//!
//! The concrete implementation is selected at startup from
//! `clarity-gateway.yaml`. The in-memory store is used for development and
//! testing; PostgreSQL for production.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::record::{AnalysisRecord, RecordId};

/// Storage backend selection for pluggable persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres(PostgresConfig),
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::Memory
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub connection_string: String,
}

/// Append-only store of completed analyses.
///
/// The store assigns the identifier; callers never pick ids. Records are
/// immutable once added, so no update or delete operation exists.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a record and return its store-assigned identifier.
    async fn add(&self, record: &AnalysisRecord) -> Result<RecordId, StoreError>;

    /// Find a record by ID
    async fn find_by_id(&self, id: RecordId) -> Result<Option<AnalysisRecord>, StoreError>;
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store write timed out after {0}s")]
    Timeout(u64),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("Row not found".to_string()),
            _ => StoreError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
