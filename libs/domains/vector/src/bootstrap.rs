//! Idempotent collection bootstrap, run at startup and by `init_jd_schema`.

use std::time::Duration;

use database::common::{Attempted, RetryConfig, RetryExhausted, retry_counted};
use tracing::{debug, error, info, warn};

use crate::error::{VectorError, VectorResult};
use crate::repository::SchemaRepository;
use crate::schema::{CollectionSchema, interviewer_jd_schema};
use crate::weaviate::{WeaviateConfig, WeaviateRepository};

/// Listing attempts before the bootstrap is skipped
pub const LIST_ATTEMPTS: u32 = 5;

/// Pause between listing attempts
pub const LIST_RETRY_DELAY: Duration = Duration::from_secs(2);

/// How a bootstrap run ended when it did not hard-fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The collection was already present; nothing was created.
    AlreadyExists { attempts: u32 },
    /// The collection was missing and has been created.
    Created { attempts: u32 },
    /// The store could not be listed; startup continues without the collection.
    Skipped { attempts: u32, last_error: String },
}

impl BootstrapOutcome {
    /// Number of listing attempts made
    pub fn attempts(&self) -> u32 {
        match self {
            BootstrapOutcome::AlreadyExists { attempts }
            | BootstrapOutcome::Created { attempts }
            | BootstrapOutcome::Skipped { attempts, .. } => *attempts,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, BootstrapOutcome::Skipped { .. })
    }
}

/// Ensures a collection exists.
///
/// Listing is retried under a fixed-delay policy. An unreachable store is a
/// soft failure ([`BootstrapOutcome::Skipped`]); a rejected create is a hard
/// failure and is never retried, since a retry could race another instance
/// that created the collection in the meantime.
pub struct SchemaBootstrapper<R: SchemaRepository> {
    repository: R,
    retry: RetryConfig,
}

impl<R: SchemaRepository> SchemaBootstrapper<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            retry: RetryConfig::fixed(LIST_ATTEMPTS, LIST_RETRY_DELAY),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub async fn ensure_collection(&self, schema: &CollectionSchema) -> VectorResult<BootstrapOutcome> {
        schema.validate()?;

        debug!(
            collection = %schema.name,
            max_attempts = self.retry.max_attempts,
            max_wait_ms = self.retry.total_delay_ceiling().as_millis() as u64,
            "Listing collections"
        );

        let listing = retry_counted(|| self.repository.list_collections(), &self.retry).await;

        let attempts = match listing {
            Ok(Attempted { value: existing, attempts }) => {
                if existing.contains(&schema.name) {
                    info!(collection = %schema.name, attempts, "Collection already exists, skipping creation");
                    return Ok(BootstrapOutcome::AlreadyExists { attempts });
                }
                attempts
            }
            Err(RetryExhausted { attempts, last_error }) => {
                warn!(
                    collection = %schema.name,
                    attempts,
                    error = %last_error,
                    "Vector store unreachable, skipping collection bootstrap"
                );
                return Ok(BootstrapOutcome::Skipped {
                    attempts,
                    last_error: last_error.to_string(),
                });
            }
        };

        match self.repository.create_collection(schema).await {
            Ok(()) => {
                info!(
                    collection = %schema.name,
                    properties = schema.properties.len(),
                    "Collection created"
                );
                Ok(BootstrapOutcome::Created { attempts })
            }
            Err(e) => {
                error!(collection = %schema.name, error = %e, "Collection creation failed");
                Err(match e {
                    VectorError::CreateFailed { .. } => e,
                    other => VectorError::CreateFailed {
                        collection: schema.name.clone(),
                        message: other.to_string(),
                    },
                })
            }
        }
    }
}

/// Ensure the JD collection named in `config` exists in Weaviate.
pub async fn bootstrap_jd_collection(config: &WeaviateConfig) -> VectorResult<BootstrapOutcome> {
    info!(
        collection = %config.jd_collection,
        url = %config.base_url(),
        grpc = %config.grpc_address(),
        "Bootstrapping vector-store collection"
    );

    let repository = WeaviateRepository::new(config.clone())?;
    let schema = interviewer_jd_schema(&config.jd_collection);

    SchemaBootstrapper::new(repository)
        .ensure_collection(&schema)
        .await
}
