use axum::Router;

pub mod health;
pub mod memory;
pub mod query;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/query", query::router(state))
        .nest("/memory", memory::router(state))
}

/// Router with the `/ready` endpoint, which probes the database and Weaviate.
///
/// Has its state applied, so it merges with the stateless app router.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
