// src/error/types.rs
use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider '{provider}' responded with status {status}")]
    UpstreamStatus { provider: &'static str, status: u16 },

    #[error("malformed response from '{provider}': {detail}")]
    MalformedResponse {
        provider: &'static str,
        detail: String,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
