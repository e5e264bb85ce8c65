//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use classifier::ClassifyError;
use orchestrator::OrchestratorError;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Classification failed: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Game session error: {0}")]
    Orchestrator(#[from] OrchestratorError),
}

impl WebServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::Classify(e) if e.is_client_input() => StatusCode::BAD_REQUEST,
            WebServerError::Classify(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            WebServerError::Orchestrator(OrchestratorError::CatalogUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!("Request failed with {}: {}", status, self);

        // Internal details stay in the log
        let body = if status == StatusCode::BAD_REQUEST {
            self.to_string()
        } else {
            status.canonical_reason().unwrap_or("error").to_lowercase()
        };
        (status, body).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
