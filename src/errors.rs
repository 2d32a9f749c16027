use thiserror::Error;

/// Errors raised anywhere in the assistant.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl AssistantError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        AssistantError::Config(msg.into())
    }

    pub fn storage_error(msg: impl Into<String>) -> Self {
        AssistantError::Storage(msg.into())
    }
}

pub type AssistantResult<T> = Result<T, AssistantError>;
