//! Errors raised by the AI core.

use skirmish_common::{EnemyId, SkirmishError};
use thiserror::Error;

/// Error types for AI operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AiError {
    /// Enemy was never registered or has been removed
    #[error("enemy not registered: {0}")]
    NotRegistered(EnemyId),
    /// Registered enemy is missing its AI state record
    #[error("missing AI state for {0}")]
    MissingAiState(EnemyId),
    /// Registered enemy is missing its attack cycle
    #[error("missing attack cycle for {0}")]
    MissingAttackCycle(EnemyId),
    /// Health value is not a finite number
    #[error("invalid health {value} for {id}")]
    InvalidHealth {
        /// Enemy
        id: EnemyId,
        /// Rejected value
        value: f32,
    },
}

/// Result type for AI operations.
pub type AiResult<T> = Result<T, AiError>;

impl From<AiError> for SkirmishError {
    fn from(err: AiError) -> Self {
        SkirmishError::Ai(err.to_string())
    }
}
