use core_config::ConfigError;
use domain_items::ItemError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("Vector store unavailable: {0}")]
    Unavailable(String),

    #[error("Qdrant {operation} failed ({status}): {body}")]
    Upstream {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Embedding has {actual} dimensions, collection expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Chat completion error: {0}")]
    Chat(String),

    #[error("No valid points to upsert")]
    NoValidPoints,

    #[error("Item source error: {0}")]
    ItemSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type VectorResult<T> = Result<T, VectorError>;

impl From<reqwest::Error> for VectorError {
    fn from(err: reqwest::Error) -> Self {
        VectorError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for VectorError {
    fn from(err: serde_json::Error) -> Self {
        VectorError::Internal(format!("JSON error: {}", err))
    }
}

impl From<ItemError> for VectorError {
    fn from(err: ItemError) -> Self {
        VectorError::ItemSource(err.to_string())
    }
}

impl From<ConfigError> for VectorError {
    fn from(err: ConfigError) -> Self {
        VectorError::Config(err.to_string())
    }
}
