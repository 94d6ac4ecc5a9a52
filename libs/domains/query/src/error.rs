use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::llm::LlmError;

/// Errors surfaced by the query and upload endpoints.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("basic_count + project_count + scenario_count must not exceed {limit}, got {requested}")]
    TooManyQuestions { requested: u64, limit: u32 },

    #[error("RAG execution failed: {0}")]
    Pipeline(#[source] PipelineError),

    #[error("JD upload is only allowed in interviewer mode")]
    ForbiddenMode,

    #[error("No interviewer memory_id found: {0}")]
    MemoryNotFound(String),

    #[error("Memory registry lookup failed: {0}")]
    Registry(#[source] StoreError),

    #[error("JD upload failed: {0}")]
    UploadFailed(#[source] StoreError),

    #[error("Memory creation failed: {0}")]
    CreateFailed(#[source] StoreError),
}

pub type QueryResult<T> = Result<T, QueryError>;

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidBody(rejection) => AppError::JsonExtractorRejection(rejection),
            QueryError::MissingField(_) | QueryError::TooManyQuestions { .. } => {
                AppError::BadRequest(err.to_string())
            }
            QueryError::ForbiddenMode => AppError::Forbidden(err.to_string()),
            QueryError::MemoryNotFound(_) => AppError::NotFound(err.to_string()),
            QueryError::Pipeline(_) => AppError::Upstream(err.to_string()),
            QueryError::Registry(_) | QueryError::UploadFailed(_) | QueryError::CreateFailed(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Registry and JD store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures inside the retrieval/generation pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: QueryError) -> StatusCode {
        AppError::from(err).status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(QueryError::MissingField("query")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(QueryError::TooManyQuestions {
                requested: 51,
                limit: 50
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(QueryError::ForbiddenMode), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(QueryError::MemoryNotFound("m1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(QueryError::Pipeline(PipelineError::Other("boom".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(QueryError::Registry(StoreError::Internal("down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(QueryError::UploadFailed(StoreError::Internal("full".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(QueryError::CreateFailed(StoreError::Internal("down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            QueryError::MissingField("resume_url").to_string(),
            "resume_url is required"
        );
        assert_eq!(
            QueryError::Pipeline(PipelineError::Other("upstream timeout".into())).to_string(),
            "RAG execution failed: upstream timeout"
        );
        assert_eq!(
            QueryError::MemoryNotFound("mem-42".into()).to_string(),
            "No interviewer memory_id found: mem-42"
        );
        assert_eq!(
            QueryError::UploadFailed(StoreError::Internal("disk full".into())).to_string(),
            "JD upload failed: disk full"
        );
    }
}
