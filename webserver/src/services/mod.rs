//! WebServer service implementations

pub mod websocket_player;

pub use websocket_player::*;
