use thiserror::Error;

/// Result type for model sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while comparing, selecting, and merging models
#[derive(Error, Debug)]
pub enum Error {
    /// A required input model has not been supplied yet. This is a valid
    /// wait state for the UI; it only becomes an error when an operation
    /// that needs the input is invoked.
    #[error("Input missing: no {0} loaded")]
    InputMissing(&'static str),

    #[error("Parse failed: {0}")]
    ParseFailed(String),

    #[error("Comparison failed: {0}")]
    ComparisonFailed(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
