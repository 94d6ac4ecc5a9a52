use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::{QueryError, QueryResult};
use crate::models::{
    DEFAULT_AUX_TOP_K, DEFAULT_BASIC_COUNT, DEFAULT_JD_TOP_K, DEFAULT_MAX_CHARS,
    DEFAULT_MEMORY_TOP_K, DEFAULT_PROJECT_COUNT, DEFAULT_RECENT_K, DEFAULT_SCENARIO_COUNT,
    DEFAULT_SUMMARY_K, InterviewQuery, MAX_INTERVIEW_QUESTIONS, QueryRequest, QueryRequestBody, QueryResponse,
    StandardQuery, is_interviewer,
};
use crate::pipeline::Pipeline;
use crate::projector::{project_answer, project_questions};

/// Routes `POST /query` to the pipeline operation for the declared mode.
///
/// Any mode other than `interviewer` takes the standard path.
#[derive(Clone)]
pub struct RequestDispatcher {
    pipeline: Arc<dyn Pipeline>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RequestDispatcher {
    pub fn new(pipeline: Arc<dyn Pipeline>) -> Self {
        Self { pipeline }
    }

    /// Check mode-specific required fields and fill documented defaults.
    pub fn validate(body: QueryRequestBody) -> QueryResult<QueryRequest> {
        if body.memory_id.trim().is_empty() {
            return Err(QueryError::MissingField("memory_id"));
        }

        if is_interviewer(&body.mode) {
            let resume_url =
                non_empty(body.resume_url).ok_or(QueryError::MissingField("resume_url"))?;

            let basic_count = body.basic_count.unwrap_or(DEFAULT_BASIC_COUNT);
            let project_count = body.project_count.unwrap_or(DEFAULT_PROJECT_COUNT);
            let scenario_count = body.scenario_count.unwrap_or(DEFAULT_SCENARIO_COUNT);

            let requested =
                u64::from(basic_count) + u64::from(project_count) + u64::from(scenario_count);
            if requested > u64::from(MAX_INTERVIEW_QUESTIONS) {
                return Err(QueryError::TooManyQuestions {
                    requested,
                    limit: MAX_INTERVIEW_QUESTIONS,
                });
            }

            return Ok(QueryRequest::Interview(InterviewQuery {
                memory_id: body.memory_id,
                mode: body.mode,
                resume_url,
                jd_id: non_empty(body.jd_id),
                company: body.company,
                target_position: body.target_position,
                jd_top_k: body.jd_top_k.unwrap_or(DEFAULT_JD_TOP_K),
                memory_top_k: body.memory_top_k.unwrap_or(DEFAULT_MEMORY_TOP_K),
                max_chars: body.max_chars.unwrap_or(DEFAULT_MAX_CHARS),
                basic_count,
                project_count,
                scenario_count,
            }));
        }

        let query = non_empty(body.query).ok_or(QueryError::MissingField("query"))?;

        Ok(QueryRequest::Standard(StandardQuery {
            memory_id: body.memory_id,
            mode: body.mode,
            query,
            summary_k: body.summary_k.unwrap_or(DEFAULT_SUMMARY_K),
            recent_k: body.recent_k.unwrap_or(DEFAULT_RECENT_K),
            aux_top_k: body.aux_top_k.unwrap_or(DEFAULT_AUX_TOP_K),
            max_chars: body.max_chars.unwrap_or(DEFAULT_MAX_CHARS),
        }))
    }

    #[instrument(skip_all, fields(memory_id = %body.memory_id, mode = %body.mode))]
    pub async fn dispatch(&self, body: QueryRequestBody) -> QueryResult<QueryResponse> {
        match Self::validate(body)? {
            QueryRequest::Standard(query) => {
                debug!("Dispatching to standard pipeline");
                let result = self.pipeline.run(&query).await.map_err(QueryError::Pipeline)?;
                Ok(project_answer(result))
            }
            QueryRequest::Interview(query) => {
                debug!(
                    questions = query.total_questions(),
                    jd_id = query.jd_id.as_deref(),
                    "Dispatching to interview question generation"
                );
                let result = self
                    .pipeline
                    .generate_interview_questions(&query)
                    .await
                    .map_err(QueryError::Pipeline)?;
                Ok(project_questions(result))
            }
        }
    }
}
