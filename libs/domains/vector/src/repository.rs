use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::VectorResult;
use crate::schema::CollectionSchema;

/// Schema-level operations on the vector store
///
/// Object reads and writes belong to the retrieval pipeline; this service
/// only needs to know which collections exist and to create missing ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaRepository: Send + Sync {
    /// Names of every collection currently defined in the store
    async fn list_collections(&self) -> VectorResult<HashSet<String>>;

    /// Create a collection; fails if the store rejects it (including when it already exists)
    async fn create_collection(&self, schema: &CollectionSchema) -> VectorResult<()>;
}
