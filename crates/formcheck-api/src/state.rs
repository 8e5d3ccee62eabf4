//! Application state.

use std::sync::Arc;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
