//! Error types shared across the quiz.

use std::time::Duration;

use thiserror::Error;

use crate::models::Screen;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{0} is not set; export an OpenRouter API key before starting the quiz")]
    MissingCredential(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Errors raised while producing a batch of questions.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("failed to create OpenRouter client: {0}")]
    Client(String),
    #[error("OpenRouter API error: {0}")]
    Request(String),
    #[error("no response choices received")]
    EmptyResponse,
    #[error("failed to parse quiz response: {0}")]
    Malformed(String),
    #[error("no questions generated")]
    NoQuestions,
    #[error("expected {expected} questions, got {got}")]
    ShortBatch { expected: usize, got: usize },
    #[error("question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
    #[error("content request timed out after {0:?}")]
    TimedOut(Duration),
    #[error("content worker is not running")]
    WorkerUnavailable,
}

/// Errors for a free-form question count typed on the setup screen.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid number (กรุณากรอกจำนวนที่ถูกต้อง)")]
    InvalidCount,
    #[error("Too many! Max {max} (ลองไม่เกิน {max} ข้อดีกว่า)")]
    CountTooLarge { max: usize },
}

/// Errors raised while loading a question illustration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MediaError {
    #[error("illustration request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error("illustration request timed out after {0:?}")]
    TimedOut(Duration),
}

/// Errors raised by the session controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot handle {event} while on the {from:?} screen")]
    InvalidTransition { from: Screen, event: &'static str },
}
