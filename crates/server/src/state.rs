//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::auth::{LogOtpSender, OtpSender};
use crate::services::storage::StorageClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to configuration, the
/// database pool and the external-collaborator clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    storage: StorageClient,
    otp_sender: Box<dyn OtpSender>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let storage = StorageClient::new(&config.storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                storage,
                // Dev sender until an SMS gateway client lands.
                otp_sender: Box::new(LogOtpSender),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the object storage client.
    #[must_use]
    pub fn storage(&self) -> &StorageClient {
        &self.inner.storage
    }

    /// Get a reference to the OTP delivery sender.
    #[must_use]
    pub fn otp_sender(&self) -> &dyn OtpSender {
        self.inner.otp_sender.as_ref()
    }
}
