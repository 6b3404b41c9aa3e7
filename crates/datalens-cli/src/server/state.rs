//! Application state for the web server.

use std::sync::Arc;

use datalens::{Dashboard, DashboardConfig};

/// Shared application state.
///
/// Requests only read the dashboard, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            dashboard: Arc::new(Dashboard::with_config(config)),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        self.dashboard.config()
    }
}
