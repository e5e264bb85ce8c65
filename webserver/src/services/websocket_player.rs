//! The remote player behind one WebSocket
//!
//! The browser pushes its canvas with every submission; exporting the
//! drawing therefore returns the most recent push instead of asking the
//! browser again. Events for the browser go through a channel drained by
//! the socket's writer task.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use orchestrator::{DrawingSurface, GameEvent, OrchestratorError, OrchestratorResult, Presenter};

#[derive(Clone)]
pub struct WebSocketPlayer {
    latest_image: Arc<RwLock<Option<String>>>,
    outgoing: mpsc::Sender<GameEvent>,
}

impl WebSocketPlayer {
    pub fn new(outgoing: mpsc::Sender<GameEvent>) -> Self {
        Self {
            latest_image: Arc::new(RwLock::new(None)),
            outgoing,
        }
    }

    /// Remember the canvas the browser just sent
    pub async fn store_image(&self, image: String) {
        *self.latest_image.write().await = Some(image);
    }
}

#[async_trait]
impl DrawingSurface for WebSocketPlayer {
    async fn export_image(&self) -> OrchestratorResult<String> {
        self.latest_image
            .read()
            .await
            .clone()
            .ok_or_else(|| OrchestratorError::surface("nothing has been drawn yet"))
    }

    async fn reset(&self) -> OrchestratorResult<()> {
        self.latest_image.write().await.take();
        self.outgoing
            .send(GameEvent::ResetSurface)
            .await
            .map_err(|_| OrchestratorError::Disconnected)
    }
}

#[async_trait]
impl Presenter for WebSocketPlayer {
    async fn present(&self, event: GameEvent) {
        if self.outgoing.send(event).await.is_err() {
            debug!("Dropping event for closed socket");
        }
    }
}
