use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Mode that generates interview questions and may upload JDs
pub const INTERVIEWER_MODE: &str = "interviewer";

/// Mode used when a request does not declare one
pub const DEFAULT_MODE: &str = "default";

pub const DEFAULT_SUMMARY_K: u32 = 1;
pub const DEFAULT_RECENT_K: u32 = 6;
pub const DEFAULT_AUX_TOP_K: u32 = 5;
pub const DEFAULT_MAX_CHARS: usize = 4000;

pub const DEFAULT_JD_TOP_K: u32 = 3;
pub const DEFAULT_MEMORY_TOP_K: u32 = 3;
pub const DEFAULT_BASIC_COUNT: u32 = 3;
pub const DEFAULT_PROJECT_COUNT: u32 = 3;
pub const DEFAULT_SCENARIO_COUNT: u32 = 2;

/// Upper bound on `basic_count + project_count + scenario_count`
pub const MAX_INTERVIEW_QUESTIONS: u32 = 50;

fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}

/// Case-insensitive check for the interviewer mode.
pub fn is_interviewer(mode: &str) -> bool {
    mode.eq_ignore_ascii_case(INTERVIEWER_MODE)
}

/// `POST /query` body as received; `mode` (alias `app`) selects which
/// fields matter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct QueryRequestBody {
    #[serde(default)]
    #[schema(example = "mem-42")]
    pub memory_id: String,

    /// `default` or `interviewer`, case-insensitive
    #[serde(default = "default_mode", alias = "app")]
    #[schema(example = "default")]
    pub mode: String,

    // Standard mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux_top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,

    // Interviewer mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jd_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jd_top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_count: Option<u32>,
}

/// Open-domain question answering over a memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardQuery {
    pub memory_id: String,
    /// As sent by the client
    pub mode: String,
    pub query: String,
    pub summary_k: u32,
    pub recent_k: u32,
    pub aux_top_k: u32,
    pub max_chars: usize,
}

/// Interview-question generation from a resume and an optional JD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewQuery {
    pub memory_id: String,
    pub mode: String,
    pub resume_url: String,
    pub jd_id: Option<String>,
    pub company: Option<String>,
    pub target_position: Option<String>,
    pub jd_top_k: u32,
    pub memory_top_k: u32,
    pub max_chars: usize,
    pub basic_count: u32,
    pub project_count: u32,
    pub scenario_count: u32,
}

impl InterviewQuery {
    pub fn total_questions(&self) -> u32 {
        self.basic_count
            .saturating_add(self.project_count)
            .saturating_add(self.scenario_count)
    }
}

/// A validated query, one variant per mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRequest {
    Standard(StandardQuery),
    Interview(InterviewQuery),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StandardAnswer {
    #[schema(example = "X is ...")]
    pub answer: String,
    /// Always present; `null` when the pipeline reports no context
    #[schema(value_type = Option<Object>)]
    pub context_used: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InterviewQuestions {
    /// Always `interviewer`
    #[schema(example = "interviewer")]
    pub mode: String,
    pub questions: Vec<String>,
    #[schema(value_type = Option<Object>)]
    pub context_used: Option<Value>,
}

/// `POST /query` response; the shape follows the request mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QueryResponse {
    Interview(InterviewQuestions),
    Standard(StandardAnswer),
}

/// `POST /query/uploadJD` body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadJdRequest {
    #[serde(default = "default_mode", alias = "app")]
    #[schema(example = "interviewer")]
    pub mode: String,
    pub memory_id: String,
    pub company: String,
    pub position: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadJdResponse {
    pub jd_id: Uuid,
    #[schema(example = "JD uploaded successfully")]
    pub message: String,
}

/// `POST /memory/create` body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMemoryRequest {
    /// Mode the memory serves; also the prefix of the generated id
    #[serde(alias = "mode")]
    #[schema(example = "interviewer")]
    pub app: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateMemoryResponse {
    #[schema(example = "interviewer_3f2a9c1b7d4e")]
    pub memory_id: String,
}

/// A memory and the mode it was registered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRegistration {
    pub memory_id: String,
    pub mode: String,
    /// Creation parameters, an empty object when none were given
    pub params: Value,
}

/// JD fields supplied by an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJd {
    pub memory_id: String,
    pub company: String,
    pub position: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdRecord {
    pub jd_id: Uuid,
    pub memory_id: String,
    pub company: String,
    pub position: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Token accounting reported by the model provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Raw result of a standard pipeline run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineAnswer {
    pub answer: String,
    pub context_used: Option<Value>,
    pub model: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// Raw result of interview-question generation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterviewQuestionSet {
    pub questions: Vec<String>,
    pub context_used: Option<Value>,
    pub model: Option<String>,
    pub usage: Option<TokenUsage>,
}
