//! Vector-store schema management for the interviewer knowledge base.
//!
//! - [`schema`]: collection definitions, including the JD collection
//! - [`SchemaRepository`]: list/create operations, implemented for Weaviate
//! - [`SchemaBootstrapper`]: idempotent, retrying startup bootstrap

pub mod bootstrap;
pub mod error;
pub mod repository;
pub mod schema;
pub mod weaviate;

pub use bootstrap::{BootstrapOutcome, SchemaBootstrapper, bootstrap_jd_collection};
pub use error::{VectorError, VectorResult};
pub use repository::SchemaRepository;
pub use schema::{
    CollectionSchema, DataType, INTERVIEWER_JD_COLLECTION, PropertyDef, VectorMode,
    interviewer_jd_schema,
};
pub use weaviate::{WeaviateConfig, WeaviateRepository};
