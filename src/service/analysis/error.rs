//! Error types for contract analysis

use thiserror::Error;

/// Error type for the analysis and summary pipelines
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// The LLM provider call failed (network, auth, quota)
    #[error("LLM request failed: {0}")]
    Upstream(String),

    /// No JSON object could be recovered from the completion
    #[error("Malformed completion: {0}")]
    MalformedCompletion(String),

    /// The recovered JSON does not match the analysis schema
    #[error("Response validation failed: {0}")]
    ResponseValidation(String),
}
