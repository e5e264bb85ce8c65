//! Main webserver implementation

use std::future::Future;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use classifier::Classifier;

use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::web::handlers::{api, websocket};

/// HTTP front door over any [`Classifier`]
pub struct WebServer<C: Classifier + 'static> {
    state: AppState<C>,
}

impl<C: Classifier + 'static> WebServer<C> {
    pub fn new(state: AppState<C>) -> Self {
        Self { state }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        let static_files = ServeDir::new(&self.state.config.static_dir);

        Router::new()
            .route("/categories", get(api::categories::<C>))
            .route("/classify", post(api::classify::<C>))
            .route("/health", get(api::health::<C>))
            .route("/ws", get(websocket::websocket_handler::<C>))
            .fallback_service(static_files)
            .layer(
                ServiceBuilder::new()
                    .layer(DefaultBodyLimit::max(self.state.config.body_limit()))
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.state.clone())
    }

    /// Serve until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = self.state.config.bind_address;
        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {}: {}", address, e)))?;

        info!("🌐 Web server listening on http://{}", address);

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Server error: {}", e)))
    }
}
