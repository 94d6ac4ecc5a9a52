//! Shared application state.

use std::sync::Arc;

use domain_query::{
    InMemoryJdStore, InMemoryMemoryRegistry, JdStore, LlmClient, MemoryRegistry, PgJdStore,
    PgMemoryRegistry,
};
use domain_vector::WeaviateRepository;
use sea_orm::DatabaseConnection;

/// Cloned into every router; all members are cheap `Arc`/pool clones.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Registry/JD database; absent when running with in-memory stores
    pub db: Option<DatabaseConnection>,
    pub weaviate: WeaviateRepository,
    /// Built once in `main` and shared by every request
    pub llm: Arc<dyn LlmClient>,
    pub registry: Arc<dyn MemoryRegistry>,
    pub jd_store: Arc<dyn JdStore>,
}

/// Registry and JD store backends for the given connection.
pub fn stores(db: Option<&DatabaseConnection>) -> (Arc<dyn MemoryRegistry>, Arc<dyn JdStore>) {
    match db {
        Some(db) => (
            Arc::new(PgMemoryRegistry::new(db.clone())),
            Arc::new(PgJdStore::new(db.clone())),
        ),
        None => (
            Arc::new(InMemoryMemoryRegistry::new()),
            Arc::new(InMemoryJdStore::new()),
        ),
    }
}
