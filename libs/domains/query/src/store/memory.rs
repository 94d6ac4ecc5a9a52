use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{JdStore, MemoryRegistry};
use crate::error::StoreResult;
use crate::models::{JdRecord, MemoryRegistration, NewJd};

/// Process-local registry for development and tests
#[derive(Default)]
pub struct InMemoryMemoryRegistry {
    entries: RwLock<HashMap<String, MemoryRegistration>>,
}

impl InMemoryMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoryRegistry for InMemoryMemoryRegistry {
    async fn get(&self, memory_id: &str) -> StoreResult<Option<MemoryRegistration>> {
        let entries = self.entries.read().await;
        Ok(entries.get(memory_id).cloned())
    }

    async fn register(
        &self,
        memory_id: &str,
        mode: &str,
        params: Value,
    ) -> StoreResult<MemoryRegistration> {
        let registration = MemoryRegistration {
            memory_id: memory_id.to_string(),
            mode: mode.to_string(),
            params,
        };

        let mut entries = self.entries.write().await;
        entries.insert(memory_id.to_string(), registration.clone());
        Ok(registration)
    }
}

/// Process-local JD store for development and tests
#[derive(Default)]
pub struct InMemoryJdStore {
    records: RwLock<HashMap<Uuid, JdRecord>>,
}

impl InMemoryJdStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl JdStore for InMemoryJdStore {
    async fn insert(&self, jd: NewJd) -> StoreResult<Uuid> {
        let jd_id = Uuid::now_v7();
        let record = JdRecord {
            jd_id,
            memory_id: jd.memory_id,
            company: jd.company,
            position: jd.position,
            content: jd.content,
            created_at: Utc::now(),
        };

        let mut records = self.records.write().await;
        records.insert(jd_id, record);
        Ok(jd_id)
    }

    async fn get(&self, jd_id: Uuid) -> StoreResult<Option<JdRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&jd_id).cloned())
    }
}
