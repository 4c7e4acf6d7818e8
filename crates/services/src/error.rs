//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{AnswerError, QuestionError};

/// Errors emitted by `QuizApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("quiz api responded with status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("quiz api returned an invalid payload: {0}")]
    Payload(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// True when the backend reported a server-side or transport problem worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => status.is_server_error(),
            ApiError::Http(err) => err.is_timeout() || err.is_connect(),
            ApiError::Payload(_) | ApiError::Url(_) => false,
        }
    }
}

/// Errors emitted while reading client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid api url {raw}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid value for {key}: {raw}")]
    InvalidNumber { key: &'static str, raw: String },
}

/// Errors emitted by the quiz session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error("time is up for this session")]
    Expired,
    #[error("quiz submission already in progress")]
    Submitting,
    #[error("feedback is still showing for the current question")]
    FeedbackPending,
    #[error("question {index} already has a saved answer")]
    AlreadyAnswered { index: usize },
    #[error("no answer selected for the current question")]
    NothingSelected,
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
