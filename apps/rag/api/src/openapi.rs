use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "RAG API",
        version = "0.1.0",
        description = "Memory-backed question answering and interviewer question generation"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/query", api = domain_query::ApiDoc),
        (path = "/memory", api = domain_query::MemoryApiDoc)
    )
)]
pub struct ApiDoc;
