//! Pipeline results to client responses. Provider details (model name,
//! token usage) stay server-side.

use crate::models::{
    INTERVIEWER_MODE, InterviewQuestionSet, InterviewQuestions, PipelineAnswer, QueryResponse,
    StandardAnswer,
};

impl From<PipelineAnswer> for StandardAnswer {
    fn from(result: PipelineAnswer) -> Self {
        Self {
            answer: result.answer,
            context_used: result.context_used,
        }
    }
}

impl From<InterviewQuestionSet> for InterviewQuestions {
    fn from(result: InterviewQuestionSet) -> Self {
        Self {
            mode: INTERVIEWER_MODE.to_string(),
            questions: result.questions,
            context_used: result.context_used,
        }
    }
}

pub fn project_answer(result: PipelineAnswer) -> QueryResponse {
    QueryResponse::Standard(result.into())
}

pub fn project_questions(result: InterviewQuestionSet) -> QueryResponse {
    QueryResponse::Interview(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenUsage;
    use serde_json::json;

    #[test]
    fn test_internal_fields_are_dropped() {
        let response = project_answer(PipelineAnswer {
            answer: "42".into(),
            context_used: Some(json!({"summary_urls": []})),
            model: Some("gpt-4o-mini".into()),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 2,
                total_tokens: 12,
            }),
        });

        let value = serde_json::to_value(&response).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"answer"));
        assert!(keys.contains(&"context_used"));
    }

    #[test]
    fn test_questions_always_tagged_interviewer() {
        let response = project_questions(InterviewQuestionSet {
            questions: vec!["Q1".into()],
            ..Default::default()
        });

        match response {
            QueryResponse::Interview(q) => {
                assert_eq!(q.mode, "interviewer");
                assert_eq!(q.questions, vec!["Q1"]);
                assert_eq!(q.context_used, None);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
