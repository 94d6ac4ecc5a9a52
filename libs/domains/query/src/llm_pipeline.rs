use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::PipelineError;
use crate::llm::{CompletionRequest, LlmClient};
use crate::models::{InterviewQuery, InterviewQuestionSet, PipelineAnswer, StandardQuery};
use crate::pipeline::Pipeline;
use crate::store::JdStore;

const ANSWER_SYSTEM_PROMPT: &str =
    "You are a careful assistant. Answer the user's question using the provided context when it is relevant.";

const INTERVIEW_SYSTEM_PROMPT: &str = "You are an experienced technical interviewer. \
Write interview questions only, never answers. Output one question per line with no extra commentary.";

/// [`Pipeline`] backed by a chat-completion model.
///
/// Retrieval is out of scope here; the only context attached is the
/// uploaded JD referenced by `jd_id`.
pub struct LlmPipeline {
    llm: Arc<dyn LlmClient>,
    jd_store: Arc<dyn JdStore>,
}

impl LlmPipeline {
    pub fn new(llm: Arc<dyn LlmClient>, jd_store: Arc<dyn JdStore>) -> Self {
        Self { llm, jd_store }
    }

    /// JD text truncated to `max_chars` characters.
    ///
    /// `jd_id` is an optional hint: ids that are not uploaded JDs (malformed,
    /// unknown, or crawled `job_id`s) leave the request without JD context.
    async fn jd_context(&self, query: &InterviewQuery) -> Result<Option<String>, PipelineError> {
        let Some(raw_id) = query.jd_id.as_deref() else {
            return Ok(None);
        };

        let Ok(jd_id) = Uuid::parse_str(raw_id) else {
            warn!(jd_id = raw_id, "jd_id is not an uploaded JD id, continuing without JD context");
            return Ok(None);
        };

        let Some(record) = self.jd_store.get(jd_id).await? else {
            warn!(jd_id = raw_id, "Uploaded JD not found, continuing without JD context");
            return Ok(None);
        };

        let context = format!(
            "Company: {}\nPosition: {}\n\n{}",
            record.company, record.position, record.content
        );

        Ok(Some(truncate_chars(&context, query.max_chars)))
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn interview_prompt(query: &InterviewQuery, jd_context: Option<&str>) -> String {
    let mut prompt = String::new();

    if let Some(company) = query.company.as_deref() {
        prompt.push_str(&format!("Company: {company}\n"));
    }
    if let Some(position) = query.target_position.as_deref() {
        prompt.push_str(&format!("Target position: {position}\n"));
    }
    prompt.push_str(&format!("Candidate resume: {}\n", query.resume_url));

    if let Some(jd) = jd_context {
        prompt.push_str(&format!(
            "\n--- Job description ---\n{jd}\n--- End of job description ---\n"
        ));
    }

    prompt.push_str(&format!(
        "\nWrite exactly {} questions: {} on fundamentals, {} about the candidate's projects, \
{} scenario-based. One question per line.",
        query.total_questions(),
        query.basic_count,
        query.project_count,
        query.scenario_count,
    ));

    prompt
}

/// One question per non-empty line, with list markers such as `1.`, `2)`, `-` or `*` removed.
pub fn parse_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();

    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.trim();
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        for sep in ['.', ')', '、', ':'] {
            if let Some(stripped) = rest.strip_prefix(sep) {
                return stripped.trim();
            }
        }
    }

    line
}

#[async_trait]
impl Pipeline for LlmPipeline {
    async fn run(&self, query: &StandardQuery) -> Result<PipelineAnswer, PipelineError> {
        let request = CompletionRequest::new(format!(
            "User question: {}\nAnswer concisely and accurately.",
            query.query
        ))
        .with_system(ANSWER_SYSTEM_PROMPT)
        .with_temperature(0.3)
        .with_max_tokens(800);

        let completion = self.llm.complete(request).await?;

        Ok(PipelineAnswer {
            answer: completion.text,
            context_used: None,
            model: Some(completion.model),
            usage: completion.usage,
        })
    }

    async fn generate_interview_questions(
        &self,
        query: &InterviewQuery,
    ) -> Result<InterviewQuestionSet, PipelineError> {
        let jd_context = self.jd_context(query).await?;

        if query.total_questions() == 0 {
            return Ok(InterviewQuestionSet {
                context_used: jd_context.map(Into::into),
                ..Default::default()
            });
        }

        let request = CompletionRequest::new(interview_prompt(query, jd_context.as_deref()))
            .with_system(INTERVIEW_SYSTEM_PROMPT)
            .with_temperature(0.5)
            .with_max_tokens(1200);

        let completion = self.llm.complete(request).await?;
        let questions = parse_questions(&completion.text);

        debug!(
            requested = query.total_questions(),
            parsed = questions.len(),
            "Interview questions generated"
        );

        Ok(InterviewQuestionSet {
            questions,
            context_used: jd_context.map(Into::into),
            model: Some(completion.model),
            usage: completion.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::llm::{Completion, LlmError, MockLlmClient, Role};
    use crate::models::NewJd;
    use crate::store::{InMemoryJdStore, MockJdStore};

    fn interview_query(jd_id: Option<String>) -> InterviewQuery {
        InterviewQuery {
            memory_id: "m1".into(),
            mode: "interviewer".into(),
            resume_url: "s3://resumes/a.pdf".into(),
            jd_id,
            company: Some("Acme".into()),
            target_position: None,
            jd_top_k: 3,
            memory_top_k: 3,
            max_chars: 4000,
            basic_count: 1,
            project_count: 1,
            scenario_count: 0,
        }
    }

    fn completion(text: &str) -> Completion {
        Completion {
            text: text.into(),
            model: "gpt-4o-mini".into(),
            usage: None,
        }
    }

    #[test]
    fn test_parse_questions_strips_markers() {
        let text = "1. What is ownership?\n\n2) Explain Send vs Sync\n- How did you scale X?\n* Why?\n3、Describe a failure\n   plain line  ";
        assert_eq!(
            parse_questions(text),
            vec![
                "What is ownership?",
                "Explain Send vs Sync",
                "How did you scale X?",
                "Why?",
                "Describe a failure",
                "plain line",
            ]
        );
    }

    #[test]
    fn test_parse_questions_keeps_leading_numbers_without_separator() {
        assert_eq!(parse_questions("2024 roadmap?"), vec!["2024 roadmap?"]);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("面试题目", 2), "面试");
    }

    #[tokio::test]
    async fn test_run_uses_answer_settings() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete()
            .withf(|req| {
                req.temperature == 0.3
                    && req.max_tokens == 800
                    && req.messages[0].role == Role::System
                    && req.messages[1].content.contains("what is X?")
            })
            .times(1)
            .returning(|_| Ok(completion("X is...")));

        let pipeline = LlmPipeline::new(Arc::new(llm), Arc::new(InMemoryJdStore::new()));
        let answer = pipeline
            .run(&StandardQuery {
                memory_id: "m1".into(),
                mode: "default".into(),
                query: "what is X?".into(),
                summary_k: 1,
                recent_k: 6,
                aux_top_k: 5,
                max_chars: 4000,
            })
            .await
            .unwrap();

        assert_eq!(answer.answer, "X is...");
        assert_eq!(answer.model.as_deref(), Some("gpt-4o-mini"));
    }

    #[tokio::test]
    async fn test_interview_attaches_uploaded_jd() {
        let store = Arc::new(InMemoryJdStore::new());
        let jd_id = store
            .insert(NewJd {
                memory_id: "m1".into(),
                company: "Acme".into(),
                position: "Backend Engineer".into(),
                content: "Tokio, Axum, Postgres".into(),
            })
            .await
            .unwrap();

        let mut llm = MockLlmClient::new();
        llm.expect_complete()
            .withf(|req| {
                let prompt = &req.messages[1].content;
                prompt.contains("Tokio, Axum, Postgres") && prompt.contains("exactly 2 questions")
            })
            .times(1)
            .returning(|_| Ok(completion("1. Q1\n2. Q2")));

        let pipeline = LlmPipeline::new(Arc::new(llm), store);
        let result = pipeline
            .generate_interview_questions(&interview_query(Some(jd_id.to_string())))
            .await
            .unwrap();

        assert_eq!(result.questions, vec!["Q1", "Q2"]);
        let context = result.context_used.unwrap();
        assert!(context.as_str().unwrap().contains("Backend Engineer"));
    }

    #[tokio::test]
    async fn test_interview_unresolvable_jd_id_continues_without_context() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete()
            .withf(|req| !req.messages[1].content.contains("Job description"))
            .times(2)
            .returning(|_| Ok(completion("1. Q1\n2. Q2")));

        let pipeline = LlmPipeline::new(Arc::new(llm), Arc::new(InMemoryJdStore::new()));

        for jd_id in ["j1".to_string(), Uuid::now_v7().to_string()] {
            let result = pipeline
                .generate_interview_questions(&interview_query(Some(jd_id)))
                .await
                .unwrap();

            assert_eq!(result.questions, vec!["Q1", "Q2"]);
            assert_eq!(result.context_used, None);
        }
    }

    #[tokio::test]
    async fn test_interview_jd_store_failure_is_propagated() {
        let mut store = MockJdStore::new();
        store
            .expect_get()
            .returning(|_| Err(StoreError::Internal("connection reset".into())));

        let mut llm = MockLlmClient::new();
        llm.expect_complete().times(0);

        let pipeline = LlmPipeline::new(Arc::new(llm), Arc::new(store));
        let err = pipeline
            .generate_interview_questions(&interview_query(Some(Uuid::now_v7().to_string())))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Store(_)));
    }

    #[tokio::test]
    async fn test_interview_with_saturated_counts_does_not_overflow() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete()
            .withf(|req| req.messages[1].content.contains(&format!("exactly {} questions", u32::MAX)))
            .times(1)
            .returning(|_| Ok(completion("1. Q1")));

        let mut query = interview_query(None);
        query.basic_count = u32::MAX;
        query.project_count = 1;
        query.scenario_count = 0;

        let pipeline = LlmPipeline::new(Arc::new(llm), Arc::new(InMemoryJdStore::new()));
        let result = pipeline.generate_interview_questions(&query).await.unwrap();

        assert_eq!(result.questions, vec!["Q1"]);
    }

    #[tokio::test]
    async fn test_llm_failure_is_propagated() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete().returning(|_| {
            Err(LlmError::Api {
                status: 429,
                message: "rate limited".into(),
            })
        });

        let pipeline = LlmPipeline::new(Arc::new(llm), Arc::new(InMemoryJdStore::new()));
        let err = pipeline
            .generate_interview_questions(&interview_query(None))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "LLM API error (429): rate limited");
    }
}
