// ============================
// gatekeeper backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the `Gatekeeper` auth server.

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;
use crate::auth::{AuthService, DefaultAuth};
use crate::config::Settings;
use crate::directory::UserDirectory;
use crate::storage::{FlatFileStorage, InMemoryStorage, Storage};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication gateway
    pub auth: Arc<dyn AuthService>,
    /// Settings the server was started with
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create application state over `storage`, replaying any users it already holds
    pub async fn new<S: Storage + 'static>(storage: S, settings: &Settings) -> anyhow::Result<Self> {
        let directory = Arc::new(UserDirectory::open(storage).await?);
        let auth = DefaultAuth::from_settings(directory, &settings.auth)?;
        Ok(Self::with_auth(Arc::new(auth), settings.clone()))
    }

    /// Create application state with the storage `settings.data_dir` selects:
    /// a flat file when set, memory otherwise
    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        match &settings.data_dir {
            Some(dir) => {
                tracing::info!(data_dir = %dir.display(), "using flat-file user storage");
                Self::new(FlatFileStorage::new(dir)?, settings).await
            },
            None => {
                tracing::info!("using in-memory user storage");
                Self::new(InMemoryStorage, settings).await
            },
        }
    }

    /// Wrap an existing gateway
    pub fn with_auth(auth: Arc<dyn AuthService>, settings: Settings) -> Self {
        Self {
            auth,
            settings: Arc::new(settings),
        }
    }
}
