//! Type definitions for webserver
//!
//! Wire formats of the browser-facing endpoints. Server-to-browser socket
//! messages are the orchestrator's `GameEvent`s.

use serde::{Deserialize, Serialize};

/// WebSocket messages from the drawing client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Leave the waiting screen and start the round
    Ready,
    /// A finished stroke sequence; `image` is the canvas as a data URL
    Submit { image: String },
}

/// Query of `GET /categories`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesQuery {
    /// Kept as text so a malformed count falls back to the default
    pub n: Option<String>,
}

impl CategoriesQuery {
    pub fn count(&self, default: usize) -> usize {
        self.n
            .as_deref()
            .and_then(|n| n.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// Form body of `POST /classify`
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyForm {
    pub image: String,
    #[serde(default)]
    pub expected_category: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub categories: usize,
    pub active_sessions: usize,
    pub uptime_seconds: u64,
}
