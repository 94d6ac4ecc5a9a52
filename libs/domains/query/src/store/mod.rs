//! Registry and JD persistence behind traits, with in-memory and Postgres backends.

mod memory;
mod postgres;

pub use memory::{InMemoryJdStore, InMemoryMemoryRegistry};
pub use postgres::{PgJdStore, PgMemoryRegistry};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{JdRecord, MemoryRegistration, NewJd};

/// Lookup of registered memories and their modes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemoryRegistry: Send + Sync {
    async fn get(&self, memory_id: &str) -> StoreResult<Option<MemoryRegistration>>;

    /// Register `memory_id` under `mode`, replacing any previous mode and params.
    async fn register(
        &self,
        memory_id: &str,
        mode: &str,
        params: Value,
    ) -> StoreResult<MemoryRegistration>;
}

/// Storage for uploaded job descriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JdStore: Send + Sync {
    /// Persist a JD and return its generated id.
    async fn insert(&self, jd: NewJd) -> StoreResult<Uuid>;

    async fn get(&self, jd_id: Uuid) -> StoreResult<Option<JdRecord>>;
}
