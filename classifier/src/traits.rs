//! Service trait definitions for dependency injection
//!
//! The recognizer RPC is abstracted behind [`Recognizer`] and the whole
//! pipeline behind [`Classifier`], so callers and tests can swap either.

use async_trait::async_trait;
use shared::{PredictionList, SessionId};

use crate::error::ClassifyResult;
use crate::ranking::RawScores;

/// One submission to classify
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRequest {
    /// Tagged base64 envelope, e.g. `data:image/png;base64,iVBOR...`
    pub envelope: String,
    /// Category the player was asked to draw; used for archive bucketing
    pub expected_category: Option<String>,
    pub session: Option<SessionId>,
}

impl ClassificationRequest {
    pub fn new(envelope: impl Into<String>) -> Self {
        Self {
            envelope: envelope.into(),
            expected_category: None,
            session: None,
        }
    }

    pub fn with_expected_category(mut self, category: impl Into<String>) -> Self {
        self.expected_category = Some(category.into());
        self
    }

    pub fn with_session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }
}

/// External recognition service
#[mockall::automock]
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Score an encoded PNG against every category the service knows
    ///
    /// The response is unsorted and may be of any length.
    async fn classify(&self, png: &[u8]) -> ClassifyResult<RawScores>;
}

/// Full submission-to-predictions pipeline
#[mockall::automock]
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Validate, forward and rank a submission. Does not retry.
    async fn classify(&self, request: ClassificationRequest) -> ClassifyResult<PredictionList>;
}
