use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use axum_helpers::errors::responses::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::QueryResult;
use crate::models::{
    CreateMemoryRequest, CreateMemoryResponse, InterviewQuestions, QueryRequestBody,
    QueryResponse, StandardAnswer, UploadJdRequest, UploadJdResponse,
};
use crate::service::QueryService;

pub const TAG: &str = "query";
pub const MEMORY_TAG: &str = "memory";

/// OpenAPI documentation for the query API
#[derive(OpenApi)]
#[openapi(
    paths(query, upload_jd),
    components(
        schemas(
            QueryRequestBody,
            QueryResponse,
            StandardAnswer,
            InterviewQuestions,
            UploadJdRequest,
            UploadJdResponse
        ),
        responses(
            BadRequestResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "RAG query and interviewer JD upload")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the memory API
#[derive(OpenApi)]
#[openapi(
    paths(create_memory),
    components(
        schemas(CreateMemoryRequest, CreateMemoryResponse),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = MEMORY_TAG, description = "Memory registration")
    )
)]
pub struct MemoryApiDoc;

/// Router for `/query`, to be nested by the application.
pub fn router(service: QueryService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(query))
        .route("/uploadJD", post(upload_jd))
        .with_state(shared_service)
}

/// Router for `/memory`, to be nested by the application.
pub fn memory_router(service: QueryService) -> Router {
    Router::new()
        .route("/create", post(create_memory))
        .with_state(Arc::new(service))
}

/// Answer a question, or generate interview questions in `interviewer` mode
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = QueryRequestBody,
    responses(
        (status = 200, description = "Answer or interview questions, depending on mode", body = QueryResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn query(
    State(service): State<Arc<QueryService>>,
    body: Result<Json<QueryRequestBody>, JsonRejection>,
) -> QueryResult<Json<QueryResponse>> {
    let Json(body) = body?;
    let response = service.query(body).await?;
    Ok(Json(response))
}

/// Upload a job description for an interviewer memory
#[utoipa::path(
    post,
    path = "/uploadJD",
    tag = TAG,
    request_body = UploadJdRequest,
    responses(
        (status = 200, description = "JD stored", body = UploadJdResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_jd(
    State(service): State<Arc<QueryService>>,
    body: Result<Json<UploadJdRequest>, JsonRejection>,
) -> QueryResult<Json<UploadJdResponse>> {
    let Json(request) = body?;
    let response = service.upload_jd(request).await?;
    Ok(Json(response))
}

/// Register a memory and return its generated id
#[utoipa::path(
    post,
    path = "/create",
    tag = MEMORY_TAG,
    request_body = CreateMemoryRequest,
    responses(
        (status = 200, description = "Memory registered", body = CreateMemoryResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_memory(
    State(service): State<Arc<QueryService>>,
    body: Result<Json<CreateMemoryRequest>, JsonRejection>,
) -> QueryResult<Json<CreateMemoryResponse>> {
    let Json(request) = body?;
    let response = service.create_memory(request).await?;
    Ok(Json(response))
}
