use thiserror::Error;
use uuid::Uuid;

pub type RsaResult<T> = Result<T, RsaError>;

#[derive(Error, Debug)]
pub enum RsaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Ad group not found: {0}")]
    AdGroupNotFound(Uuid),

    #[error("Session state error: {0}")]
    State(String),

    #[error("No ad groups available to export.")]
    NothingToExport,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for RsaError {
    fn from(err: config::ConfigError) -> Self {
        RsaError::Config(err.to_string())
    }
}
