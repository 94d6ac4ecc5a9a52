use async_trait::async_trait;

use crate::error::PipelineError;
use crate::models::{InterviewQuery, InterviewQuestionSet, PipelineAnswer, StandardQuery};

/// Retrieval-and-generation backend behind `POST /query`.
///
/// Implementations receive the validated parameters unchanged and may
/// return extra fields; only `answer`/`questions` and `context_used`
/// reach the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn run(&self, query: &StandardQuery) -> Result<PipelineAnswer, PipelineError>;

    async fn generate_interview_questions(
        &self,
        query: &InterviewQuery,
    ) -> Result<InterviewQuestionSet, PipelineError>;
}
