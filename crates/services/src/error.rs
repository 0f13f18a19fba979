//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by `ExamBackend` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("backend rejected the credentials")]
    Unauthorized,
    #[error("backend has no record for {0}")]
    NotFound(String),
    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("backend returned an unreadable body: {0}")]
    Decode(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while reading configuration from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Errors emitted by practice and review services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    State(#[from] exam_core::SessionError),
}
