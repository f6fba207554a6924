//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::Config;
use crate::polls::Dataset;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Poll data and derived tables, read-only after startup
    pub dataset: Arc<Dataset>,
    /// Server configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: ApiConfig) -> Self {
        Self {
            dataset,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Mount point, "" or "/segment"
    pub path_prefix: String,
    /// Verbose mode
    pub debug: bool,
    /// Page title
    pub title: String,
    /// Dataset page linked from the dashboard
    pub source_page_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ApiConfig {
    /// Derive the server settings from the full configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            path_prefix: config.server.normalized_prefix(),
            debug: config.server.debug,
            title: config.source.title.clone(),
            source_page_url: config.source.source_page_url.clone(),
        }
    }

    /// Builder method: mount under a path prefix
    pub fn with_path_prefix(mut self, prefix: &str) -> Self {
        self.path_prefix = crate::config::normalize_path_prefix(prefix);
        self
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
