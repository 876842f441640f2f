// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Record Store
//!
//! Production `RecordStore` implementation backed by the `clarity_outputs`
//! table via `sqlx`. The database assigns the row id and the creation
//! timestamp, so identifiers and `created_at` are authoritative server-side
//! values (see `migrations/0001_create_clarity_outputs.sql`).

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::record::{AnalysisRecord, AnalysisResult, RecordId};
use crate::domain::repository::{PostgresConfig, RecordStore, StoreError};

pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using the configured connection string.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, StoreError> {
        let pool = PgPool::connect(&config.connection_string)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to connect: {}", e)))?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn add(&self, record: &AnalysisRecord) -> Result<RecordId, StoreError> {
        let result_json = serde_json::to_value(&record.result)?;

        let row = sqlx::query(
            r#"
            INSERT INTO clarity_outputs (policy_text, result, critical, warnings)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&record.policy_text)
        .bind(result_json)
        .bind(&record.critical)
        .bind(&record.warnings)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to insert record: {}", e)))?;

        let id: uuid::Uuid = row.get("id");
        Ok(RecordId(id))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<AnalysisRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT policy_text, result, critical, warnings, created_at
            FROM clarity_outputs
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        if let Some(row) = row {
            let policy_text: String = row.get("policy_text");
            let result_val: serde_json::Value = row.get("result");
            let critical: serde_json::Value = row.get("critical");
            let warnings: serde_json::Value = row.get("warnings");
            let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

            Ok(Some(AnalysisRecord {
                policy_text,
                result: AnalysisResult(result_val),
                critical,
                warnings,
                created_at,
            }))
        } else {
            Ok(None)
        }
    }
}
