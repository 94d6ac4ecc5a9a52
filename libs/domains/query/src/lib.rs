//! Interviewer RAG query domain
//!
//! `POST /query` dispatches to a [`Pipeline`] by mode; `POST /query/uploadJD`
//! stores a job description once the [`AuthorizationGate`] has checked the
//! memory registration; `POST /memory/create` registers new memories.

pub mod dispatcher;
pub mod entity;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod llm;
pub mod llm_pipeline;
pub mod models;
pub mod pipeline;
pub mod projector;
pub mod service;
pub mod store;

pub use dispatcher::RequestDispatcher;
pub use error::{PipelineError, QueryError, QueryResult, StoreError, StoreResult};
pub use gate::AuthorizationGate;
pub use handlers::{ApiDoc, MemoryApiDoc, memory_router, router};
pub use llm::{LlmClient, LlmError, OpenAiClient, OpenAiConfig};
pub use llm_pipeline::LlmPipeline;
pub use models::*;
pub use pipeline::Pipeline;
pub use service::QueryService;
pub use store::{
    InMemoryJdStore, InMemoryMemoryRegistry, JdStore, MemoryRegistry, PgJdStore,
    PgMemoryRegistry,
};
