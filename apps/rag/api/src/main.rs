use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_query::{LlmClient, MemoryRegistry, OpenAiClient, models::INTERVIEWER_MODE};
use domain_vector::{BootstrapOutcome, WeaviateRepository, bootstrap_jd_collection};
use migration::Migrator;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Runs before the listener binds; only a rejected create aborts startup
    match bootstrap_jd_collection(&config.weaviate).await? {
        BootstrapOutcome::Skipped { attempts, last_error } => warn!(
            attempts,
            error = %last_error,
            "Starting without vector-store bootstrap"
        ),
        outcome => info!(?outcome, "Vector-store collection ready"),
    }

    let db = match config.database.clone() {
        Some(database) => {
            let db = database::postgres::connect_from_config_with_retry(database, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
            database::postgres::run_migrations::<Migrator>(&db, "rag_api").await?;
            Some(db)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory registry and JD stores");
            None
        }
    };

    let (registry, jd_store) = state::stores(db.as_ref());

    for memory_id in &config.seed_interviewer_memories {
        registry
            .register(memory_id, INTERVIEWER_MODE, serde_json::json!({}))
            .await?;
        info!(%memory_id, "Registered interviewer memory");
    }

    let llm: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(config.openai.clone())?);
    let weaviate = WeaviateRepository::new(config.weaviate.clone())?;

    let state = AppState {
        config,
        db,
        weaviate,
        llm,
        registry,
        jd_store,
    };

    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // - /health: liveness with app name/version
    // - /ready: database and Weaviate probes
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting RAG API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Some(db) = state.db {
                info!("Shutting down: closing database connections");
                match db.close().await {
                    Ok(_) => info!("PostgreSQL connection closed successfully"),
                    Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
                }
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("RAG API shutdown complete");
    Ok(())
}
