use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; the configuration is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (upload ceiling, canvas size, JPEG quality).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
