//! Connectors and startup utilities for the service's backing stores
//!
//! - [`postgres`]: SeaORM connection pool, migrations and health checks for the
//!   registry and uploaded-JD tables
//! - [`common::retry`]: the retry policy shared by the Postgres connector and
//!   the vector-store schema bootstrap
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::new(url), None).await?;
//! postgres::run_migrations::<Migrator>(&db, "rag_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
