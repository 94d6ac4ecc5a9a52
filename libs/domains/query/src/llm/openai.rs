use std::time::Duration;

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatMessage, Completion, CompletionRequest, LlmClient, LlmError};
use crate::models::TokenUsage;

/// OpenAI-compatible endpoint configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// Base URL without trailing slash, e.g. `https://api.openai.com/v1`
    pub api_base: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl FromEnv for OpenAiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("OPENAI_API_KEY")?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()));
        }

        Ok(Self::new(api_key)
            .with_api_base(&env_or_default("OPENAI_API_BASE", "https://api.openai.com/v1"))
            .with_model(env_or_default("OPENAI_MODEL", "gpt-4o-mini"))
            .with_timeout(env_parse("OPENAI_TIMEOUT_SECS", 60u64)?))
    }
}

/// `/chat/completions` client for OpenAI and compatible gateways
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// First choice's text; a response without choices yields an empty answer.
    fn into_completion(self, fallback_model: &str) -> Completion {
        let text = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Completion {
            text,
            model: self.model.unwrap_or_else(|| fallback_model.to_string()),
            usage: self.usage,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LlmError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let completion = chat.into_completion(&self.config.model);

        debug!(
            model = %completion.model,
            total_tokens = completion.usage.map(|u| u.total_tokens),
            "LLM completion received"
        );

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_API_BASE", None),
                ("OPENAI_MODEL", None),
                ("OPENAI_TIMEOUT_SECS", None),
            ],
            || {
                let config = OpenAiConfig::from_env().unwrap();
                assert_eq!(config.api_base, "https://api.openai.com/v1");
                assert_eq!(config.model, "gpt-4o-mini");
                assert_eq!(config.timeout_secs, 60);
            },
        );
    }

    #[test]
    fn test_config_requires_api_key() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            assert!(OpenAiConfig::from_env().is_err());
        });
        temp_env::with_var("OPENAI_API_KEY", Some(""), || {
            assert!(OpenAiConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_config_strips_trailing_slash() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_API_BASE", Some("https://gateway.local/v1/")),
            ],
            || {
                let config = OpenAiConfig::from_env().unwrap();
                assert_eq!(config.api_base, "https://gateway.local/v1");
            },
        );
    }

    #[test]
    fn test_chat_request_payload() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            temperature: 0.5,
            top_p: 1.0,
            max_tokens: 800,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0], json!({"role": "system", "content": "sys"}));
        assert_eq!(value["max_tokens"], 800);
    }

    #[test]
    fn test_chat_response_parsing() {
        let chat: ChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini-2024",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello"}}],
            "usage": {"prompt_tokens": 5, "completion_tokens": 1, "total_tokens": 6}
        }))
        .unwrap();

        let completion = chat.into_completion("fallback");
        assert_eq!(completion.text, "Hello");
        assert_eq!(completion.model, "gpt-4o-mini-2024");
        assert_eq!(completion.usage.unwrap().total_tokens, 6);
    }

    #[test]
    fn test_chat_response_without_choices_is_empty() {
        let chat: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        let completion = chat.into_completion("gpt-4o-mini");

        assert_eq!(completion.text, "");
        assert_eq!(completion.model, "gpt-4o-mini");
        assert!(completion.usage.is_none());
    }
}
