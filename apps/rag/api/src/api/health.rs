//! Readiness probe over the service's backing stores.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// `/ready`: database ping (when configured) and Weaviate readiness.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::with_capacity(2);

    if let Some(db) = state.db.as_ref() {
        checks.push((
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| format!("Database ping failed: {}", e))
            }),
        ));
    }

    checks.push((
        "weaviate",
        Box::pin(async {
            if state.weaviate.is_ready().await {
                Ok(())
            } else {
                Err(format!(
                    "Weaviate not ready at {}",
                    state.weaviate.config().base_url()
                ))
            }
        }),
    ));

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
