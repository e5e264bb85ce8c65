//! Capabilities the orchestrator depends on
//!
//! The drawing surface, the player-facing presentation and the category
//! source are injected so the round logic can run against real sockets in
//! the webserver and against scripted fakes in tests.

use async_trait::async_trait;
use shared::{Category, CategoryCatalog};

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::events::GameEvent;

/// Canvas the player draws on
#[mockall::automock]
#[async_trait]
pub trait DrawingSurface: Send + Sync {
    /// Current drawing as a tagged base64 envelope
    async fn export_image(&self) -> OrchestratorResult<String>;

    /// Clear the drawing before a new round
    async fn reset(&self) -> OrchestratorResult<()>;
}

/// Sink for player-visible events
#[mockall::automock]
#[async_trait]
pub trait Presenter: Send + Sync {
    async fn present(&self, event: GameEvent);
}

/// Source of round categories
#[mockall::automock]
#[async_trait]
pub trait CategoryProvider: Send + Sync {
    /// Up to `n` distinct categories in random order
    async fn categories(&self, n: usize) -> OrchestratorResult<Vec<Category>>;
}

#[async_trait]
impl CategoryProvider for CategoryCatalog {
    async fn categories(&self, n: usize) -> OrchestratorResult<Vec<Category>> {
        if self.is_empty() {
            return Err(OrchestratorError::CatalogUnavailable {
                message: "catalog is empty".to_string(),
            });
        }
        Ok(self.sample(n, &mut rand::thread_rng()))
    }
}
