//! Client configuration

use std::path::PathBuf;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for talking to the storefront server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory for client-local JSON documents (cart, last order, admin session)
    pub data_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            data_dir: data_dir.into(),
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }
}
