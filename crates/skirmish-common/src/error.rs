//! Error types shared across Skirmish crates.

use thiserror::Error;

/// Top-level error type for Skirmish operations.
#[derive(Debug, Error)]
pub enum SkirmishError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// Simulation core rejected an operation
    #[error("AI error: {0}")]
    Ai(String),
}

/// Result type alias for Skirmish operations.
pub type SkirmishResult<T> = Result<T, SkirmishError>;
