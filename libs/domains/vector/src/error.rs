use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorError {
    /// Transport-level failure: refused connection, timeout, TLS, ...
    #[error("Vector store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with a non-success status
    #[error("Vector store error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to create collection '{collection}': {message}")]
    CreateFailed { collection: String, message: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type VectorResult<T> = Result<T, VectorError>;

impl From<reqwest::Error> for VectorError {
    fn from(err: reqwest::Error) -> Self {
        VectorError::Unavailable(err.to_string())
    }
}

impl From<core_config::ConfigError> for VectorError {
    fn from(err: core_config::ConfigError) -> Self {
        VectorError::Config(err.to_string())
    }
}
