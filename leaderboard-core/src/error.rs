//! Errors raised while turning a fetched batch into standings.

use thiserror::Error;

/// Everything that can go wrong between raw JSON and ranked output.
///
/// Validation variants carry the 0-based index of the offending row so the
/// caller can point at it in the source sheet.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("row {index}: field `{field}` is not numeric (found {value})")]
    MalformedMetric {
        index: usize,
        field: String,
        value: String,
    },

    #[error("row {index}: group field `{field}` is missing or blank")]
    MissingGroupKey { index: usize, field: String },

    #[error("row {index}: subject field `{field}` is missing or blank")]
    MissingSubject { index: usize, field: String },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("unsupported input shape: {0}")]
    UnsupportedShape(String),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;
