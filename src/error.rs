//! Error types for the emotion analysis engine

use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {

    // =============================
    // Caller-facing Errors
    // =============================

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // Remote Analysis Errors
    // (absorbed by the orchestrator)
    // =============================

    #[error("Remote analyzer unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Remote HTTP error: {0}")]
    RemoteHttpError(String),

    #[error("Remote format error: {0}")]
    RemoteFormatError(String),

    #[error("Remote parse error: {0}")]
    RemoteParseError(String),
}
