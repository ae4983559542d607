use thiserror::Error;

/// Errors that abort a conversion.
///
/// Unresolved parents, unformattable timestamps and dangling canvas edges are
/// recovered where they occur and never surface here.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed task record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("unsupported input: expected a task array or a canvas with nodes and edges, got {0}")]
    UnsupportedSourceShape(String),
}
