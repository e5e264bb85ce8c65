//! Orchestrator-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("Not enough categories to start: {requested} required, {available} available")]
    Provisioning { requested: usize, available: usize },

    #[error("Category catalog unavailable: {message}")]
    CatalogUnavailable { message: String },

    #[error("Cannot {operation} while {from}")]
    InvalidTransition { from: String, operation: &'static str },

    #[error("Drawing surface failed: {message}")]
    Surface { message: String },

    #[error("Player disconnected")]
    Disconnected,

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),
}

impl OrchestratorError {
    pub fn surface(message: impl ToString) -> Self {
        OrchestratorError::Surface {
            message: message.to_string(),
        }
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
