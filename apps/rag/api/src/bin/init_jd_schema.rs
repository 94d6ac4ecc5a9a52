//! One-shot bootstrap of the interviewer JD collection.
//!
//! Exits non-zero only when the collection could not be created; an
//! unreachable store is logged and exits cleanly.

use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_vector::{BootstrapOutcome, WeaviateConfig, bootstrap_jd_collection};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let config = WeaviateConfig::from_env()?;

    match bootstrap_jd_collection(&config).await? {
        BootstrapOutcome::AlreadyExists { .. } => {
            info!(collection = %config.jd_collection, "Collection already exists")
        }
        BootstrapOutcome::Created { .. } => {
            info!(collection = %config.jd_collection, "Collection created")
        }
        BootstrapOutcome::Skipped { attempts, last_error } => warn!(
            collection = %config.jd_collection,
            attempts,
            error = %last_error,
            "Weaviate unreachable, collection not initialized"
        ),
    }

    Ok(())
}
