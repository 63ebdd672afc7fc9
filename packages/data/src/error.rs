//! Error types for the data model.

/// Errors raised when navigating or decoding the data model.
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    /// A required child was not present in a group.
    #[error("no child with name in data: {name}")]
    NotFound { name: String },

    /// A data path string could not be parsed.
    #[error("invalid data path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    /// The JSON form of a record could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
