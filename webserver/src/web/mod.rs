//! HTTP and WebSocket handlers

pub mod handlers;
