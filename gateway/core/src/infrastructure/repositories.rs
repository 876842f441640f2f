// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod postgres_record;

pub use postgres_record::PostgresRecordStore;

use crate::domain::record::{AnalysisRecord, RecordId};
use crate::domain::repository::{RecordStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory `RecordStore` for development and testing.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<Mutex<HashMap<RecordId, AnalysisRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn add(&self, record: &AnalysisRecord) -> Result<RecordId, StoreError> {
        let id = RecordId::new();
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError::Database("Mutex poisoned".to_string()))?;
        records.insert(id, record.clone());
        Ok(id)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<AnalysisRecord>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StoreError::Database("Mutex poisoned".to_string()))?;
        Ok(records.get(&id).cloned())
    }
}
