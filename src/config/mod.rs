//! Configuration module for the booking client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default search debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 220;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the booking API, e.g. `http://127.0.0.1:8080/api`
    pub api_base: String,
    /// JSON file backing the persisted token store
    pub storage_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Delay before a search keystroke re-filters the event list
    pub search_debounce: Duration,
    /// Page the tickets view redirects to on 401
    pub login_page: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base = env::var("BOOKING_API_BASE")
            .unwrap_or_else(|_| "http://127.0.0.1:8080/api".to_string());

        let storage_path = env::var("BOOKING_STORAGE_PATH")
            .unwrap_or_else(|_| "./data/storage.json".to_string())
            .into();

        let log_level = env::var("BOOKING_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let debounce_ms = match env::var("BOOKING_SEARCH_DEBOUNCE_MS") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
                tracing::warn!(
                    "Invalid BOOKING_SEARCH_DEBOUNCE_MS {:?} ({}), using {}",
                    raw,
                    e,
                    DEFAULT_DEBOUNCE_MS
                );
                DEFAULT_DEBOUNCE_MS
            }),
            Err(_) => DEFAULT_DEBOUNCE_MS,
        };

        let login_page =
            env::var("BOOKING_LOGIN_PAGE").unwrap_or_else(|_| "login.html".to_string());

        Self {
            api_base,
            storage_path,
            log_level,
            search_debounce: Duration::from_millis(debounce_ms),
            login_page,
        }
    }

    /// Override the API base, e.g. from a command-line flag.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}
