use axum::Router;
use domain_query::{LlmPipeline, QueryService, handlers};
use std::sync::Arc;

/// Service shared by the `/query` and `/memory` routers.
pub fn service(state: &crate::state::AppState) -> QueryService {
    let pipeline = LlmPipeline::new(state.llm.clone(), state.jd_store.clone());
    QueryService::new(
        Arc::new(pipeline),
        state.registry.clone(),
        state.jd_store.clone(),
    )
}

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(service(state))
}
