//! Error types for JetTag.

use thiserror::Error;

/// JetTag error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or missing input collection
    #[error("invalid input collection: {0}")]
    InvalidInput(String),

    /// Fault raised by the model-execution engine
    #[error("inference error: {0}")]
    Inference(String),

    /// Model output does not match the declared contract
    #[error("output mismatch: {0}")]
    OutputMismatch(String),

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
