//! Application state - Dependency injection container.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::services::{AuthService, Authenticator};
use crate::store::{CredentialStore, FileStore};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Credential store (health checks only; everything else goes
    /// through the auth service)
    pub store: Arc<dyn CredentialStore>,
    /// Directory holding the built dashboard bundle
    pub static_dir: PathBuf,
}

impl AppState {
    /// Create application state from configuration.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn CredentialStore> = Arc::new(FileStore::new(config.users_file.clone()));
        Self::new(
            Arc::new(Authenticator::new(store.clone())),
            store,
            config.static_dir.clone(),
        )
    }

    /// Create application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        store: Arc<dyn CredentialStore>,
        static_dir: PathBuf,
    ) -> Self {
        Self {
            auth_service,
            store,
            static_dir,
        }
    }
}
