//! Webserver for the drawing-guessing game
//!
//! Serves the drawing client, exposes the category and classification
//! endpoints, and runs one round orchestrator per connected WebSocket.

pub mod error;
pub mod services;
pub mod state;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use services::WebSocketPlayer;
pub use state::{AppState, ServerConfig};
pub use types::*;
pub use webserver_impl::WebServer;
