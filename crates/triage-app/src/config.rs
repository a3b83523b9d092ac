//! Environment-driven application configuration.

use std::path::PathBuf;

use triage_core::defaults::{
    API_BASE, ENV_API_BASE, ENV_STATE_DIR, ENV_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, STATE_DIR,
};

/// Runtime configuration for the client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Classification service base URL.
    pub api_base: String,
    /// Directory holding the persisted history/stats values.
    pub state_dir: PathBuf,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Read configuration from environment variables, with defaults.
    pub fn from_env() -> Self {
        let api_base = std::env::var(ENV_API_BASE).unwrap_or_else(|_| API_BASE.to_string());
        let state_dir = std::env::var(ENV_STATE_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(STATE_DIR));
        let timeout_secs = std::env::var(ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(REQUEST_TIMEOUT_SECS);

        Self { api_base, state_dir, timeout_secs }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            state_dir: PathBuf::from(STATE_DIR),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}
