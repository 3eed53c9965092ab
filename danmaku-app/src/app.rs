use std::sync::Arc;

use prefs_db::Database;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::OverlayConfig;

/// Application state shared by the listener, the overlay and the binary.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: RwLock<OverlayConfig>,
    /// Preference store
    db: Database,
    shutdown: CancellationToken,
}

impl SharedState {
    pub fn new(db: Database, config: OverlayConfig) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config: RwLock::new(config),
                db,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }

    /// Get a read lock on the current config.
    pub async fn config(&self) -> tokio::sync::RwLockReadGuard<'_, OverlayConfig> {
        self.inner.config.read().await
    }
}
