use axum::Router;
use domain_query::handlers;

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::memory_router(super::query::service(state))
}
