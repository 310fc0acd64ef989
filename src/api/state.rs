//! Application state for the settlement API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::PayrollStore;

/// Shared application state.
///
/// Holds the loaded catalogs and the store handle every handler settles
/// against.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn PayrollStore>,
}

impl AppState {
    /// Creates a new application state from a configuration and a store.
    pub fn new(config: ConfigLoader, store: impl PayrollStore + 'static) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the payroll store.
    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone_and_send() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }
}
