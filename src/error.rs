//! Error handling for the resume tailor engine

use thiserror::Error;

/// Error taxonomy surfaced at the engine boundary.
///
/// `Validation` covers user-correctable input problems and is always raised
/// before any extraction or scoring work begins. `Extraction` and `Internal`
/// abort the whole request; no partial analysis is ever returned.
#[derive(Error, Debug)]
pub enum TailorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing, oversized, or unsupported input. Safe to show verbatim.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Document unreadable or corrupt. The original cause is logged, not
    /// shown to the caller.
    #[error("Could not read document: {0}")]
    Extraction(String),

    /// Tailoring found no editable sections to anchor insertions into.
    #[error("Insufficient resume content: {0}")]
    InsufficientContent(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unexpected failure in scoring or matching. Reported generically.
    #[error("Analysis failed: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, TailorError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for TailorError {
    fn from(err: anyhow::Error) -> Self {
        TailorError::Internal(err.to_string())
    }
}
