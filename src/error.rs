//! Error types
//!
//! None of these ever escape the tick loop; they are surfaced through the
//! snapshot or logged and the offending operation is skipped.

use thiserror::Error;

/// Question source unreachable or unusable. Fatal to the session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataLoadError {
    /// Provider could not deliver the data (network, file system, host)
    #[error("question source unavailable: {0}")]
    Unavailable(String),

    /// Payload is not a JSON array of records
    #[error("question data is not a valid JSON array: {0}")]
    Parse(String),

    /// Every record was rejected (or none were present)
    #[error("no playable questions ({rejected} malformed records skipped)")]
    Empty { rejected: usize },

    /// Question data arrived after the session already started
    #[error("questions already loaded")]
    AlreadyLoaded,
}

/// A single question record failed validation. Recoverable: the record is dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuestionError {
    #[error("record {index}: {reason}")]
    Shape { index: usize, reason: String },

    #[error("record {index}: expected {expected} answers, found {found}")]
    AnswerCount {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("record {index}: correct answer index {correct} out of range")]
    CorrectIndex { index: usize, correct: i64 },
}

/// Settings file could not be used
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
