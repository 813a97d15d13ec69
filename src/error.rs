// src/error.rs
use thiserror::Error;

/// Failures from the cross-team translator. All three inputs are required;
/// everything past validation degrades softly instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("source team must not be empty")]
    EmptySourceTeam,
    #[error("target team must not be empty")]
    EmptyTargetTeam,
}

/// Failures when loading or saving record and weight files.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
}
