use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse};

use crate::schema::INTERVIEWER_JD_COLLECTION;

/// Weaviate connection configuration
#[derive(Debug, Clone)]
pub struct WeaviateConfig {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// Used by the ingestion job's gRPC batch writer; the REST schema client only logs it
    pub grpc_port: u16,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Collection holding job descriptions
    pub jd_collection: String,
}

impl WeaviateConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// REST base URL, e.g. `http://localhost:8080`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    pub fn grpc_address(&self) -> String {
        format!("{}:{}", self.host, self.grpc_port)
    }
}

impl FromEnv for WeaviateConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let scheme = env_or_default("WEAVIATE_SCHEME", "http");
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::ParseError {
                key: "WEAVIATE_SCHEME".to_string(),
                details: format!("expected http or https, got '{scheme}'"),
            });
        }

        Ok(Self {
            scheme,
            host: env_or_default("WEAVIATE_HOST", "localhost"),
            port: env_parse("WEAVIATE_PORT", 8080u16)?,
            grpc_port: env_parse("WEAVIATE_GRPC_PORT", 50051u16)?,
            api_key: env_optional("WEAVIATE_API_KEY"),
            timeout_secs: env_parse("WEAVIATE_TIMEOUT_SECS", 30u64)?,
            jd_collection: env_or_default("WEAVIATE_JD_COLLECTION", INTERVIEWER_JD_COLLECTION),
        })
    }
}

impl Default for WeaviateConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 8080,
            grpc_port: 50051,
            api_key: None,
            timeout_secs: 30,
            jd_collection: INTERVIEWER_JD_COLLECTION.to_string(),
        }
    }
}
