//! Application state shared across all handlers

use std::sync::Arc;

use aviline_persistence::traits::PersistenceService;

use super::config::Configuration;

/// Application state shared across all handlers
pub struct AppState {
    pub configuration: Configuration,
    /// Unified persistence service (external database or in-memory)
    pub persistence: Arc<dyn PersistenceService>,
}

impl AppState {
    pub fn persistence(&self) -> &dyn PersistenceService {
        self.persistence.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field("storage_mode", &self.persistence.storage_mode())
            .finish()
    }
}
