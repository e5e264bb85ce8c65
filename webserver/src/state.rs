//! Webserver state management

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use classifier::{Classifier, ImageLimits};
use orchestrator::GameConfig;
use shared::CategoryCatalog;

/// Settings fixed at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub static_dir: PathBuf,
    pub game: GameConfig,
    pub limits: ImageLimits,
}

impl ServerConfig {
    /// Categories returned by `/categories` when `n` is absent or invalid
    pub const DEFAULT_CATEGORY_COUNT: usize = 6;

    /// Request body cap for `/classify`
    ///
    /// The envelope is form-encoded, and percent-encoding can triple the
    /// size of base64 punctuation.
    pub fn body_limit(&self) -> usize {
        self.limits.max_encoded_len().saturating_mul(3).saturating_add(4096)
    }
}

/// State shared by every request handler
pub struct AppState<C: Classifier> {
    pub config: Arc<ServerConfig>,
    pub catalog: Arc<CategoryCatalog>,
    pub classifier: Arc<C>,
    active_sessions: Arc<AtomicUsize>,
    started_at: Instant,
}

impl<C: Classifier> AppState<C> {
    pub fn new(config: ServerConfig, catalog: Arc<CategoryCatalog>, classifier: Arc<C>) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            classifier,
            active_sessions: Arc::new(AtomicUsize::new(0)),
            started_at: Instant::now(),
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.active_sessions.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Count a session until the returned guard is dropped
    pub fn track_session(&self) -> SessionGuard {
        self.active_sessions.fetch_add(1, Ordering::Relaxed);
        SessionGuard {
            counter: Arc::clone(&self.active_sessions),
        }
    }
}

impl<C: Classifier> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            catalog: Arc::clone(&self.catalog),
            classifier: Arc::clone(&self.classifier),
            active_sessions: Arc::clone(&self.active_sessions),
            started_at: self.started_at,
        }
    }
}

pub struct SessionGuard {
    counter: Arc<AtomicUsize>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Relaxed);
    }
}
