//! Classification pipeline error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for classification operations
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Why a submission could not be classified
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Malformed image envelope: missing data separator")]
    MalformedEnvelope,

    #[error("Image payload too large: {size} encoded bytes exceeds limit of {limit}")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Image payload is not valid base64: {message}")]
    EncodingError { message: String },

    #[error("Invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("Recognizer unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("Recognizer returned an unusable response: {message}")]
    UpstreamProtocolError { message: String },

    #[error("Internal classification error: {message}")]
    Internal { message: String },
}

impl ClassifyError {
    pub fn invalid_image(reason: impl Into<String>) -> Self {
        ClassifyError::InvalidImage {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl ToString) -> Self {
        ClassifyError::UpstreamUnavailable {
            message: message.to_string(),
        }
    }

    pub fn protocol(message: impl ToString) -> Self {
        ClassifyError::UpstreamProtocolError {
            message: message.to_string(),
        }
    }

    /// The player's submission was rejected and may be resubmitted
    pub fn is_client_input(&self) -> bool {
        matches!(
            self,
            ClassifyError::MalformedEnvelope
                | ClassifyError::PayloadTooLarge { .. }
                | ClassifyError::EncodingError { .. }
                | ClassifyError::InvalidImage { .. }
        )
    }

    /// The recognizer call failed; retrying later may succeed
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ClassifyError::UpstreamUnavailable { .. } | ClassifyError::UpstreamProtocolError { .. }
        )
    }
}

/// Failure while archiving a submission. Logged, never surfaced to players.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Failed to create archive directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archived image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
