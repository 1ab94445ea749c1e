//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="0.0.0.0:3000"
//! export FETCH_BACKEND="http"          # or "browser" (needs --features browser)
//! export FETCH_TIMEOUT_SECONDS="30"
//! export DEALER_HOST="dealer.toyota.com.au"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `FETCH_BACKEND` - Page source: `http` or `browser` (default: `http`)
//! - `FETCH_TIMEOUT_SECONDS` - Page load timeout (default: 30, range: 1-300)
//! - `DEALER_HOST` - Parent host of dealer pages (default: `dealer.toyota.com.au`)
//! - `DEALER_SCHEME` - `http` or `https` (default: `https`)
//! - `USER_AGENT` - User-agent sent to dealer pages (default: desktop Chrome)

use crate::domain::target_page::{DEFAULT_DEALER_HOST, DEFAULT_DEALER_SCHEME, TargetTemplate};
use crate::infrastructure::FetchBackend;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Browser-like user-agent sent to dealer pages unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub fetch_backend: FetchBackend,
    /// Bound on a single page load, in seconds. Exceeding it is an upstream failure.
    pub fetch_timeout_seconds: u64,
    pub dealer_host: String,
    pub dealer_scheme: String,
    pub user_agent: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `FETCH_BACKEND` names an unknown backend.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let fetch_backend = match env::var("FETCH_BACKEND") {
            Ok(value) => value.parse().context("Invalid FETCH_BACKEND")?,
            Err(_) => FetchBackend::default(),
        };

        let fetch_timeout_seconds = env::var("FETCH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let dealer_host =
            env::var("DEALER_HOST").unwrap_or_else(|_| DEFAULT_DEALER_HOST.to_string());
        let dealer_scheme =
            env::var("DEALER_SCHEME").unwrap_or_else(|_| DEFAULT_DEALER_SCHEME.to_string());

        let user_agent = env::var("USER_AGENT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            fetch_backend,
            fetch_timeout_seconds,
            dealer_host,
            dealer_scheme,
            user_agent,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `fetch_timeout_seconds` is outside 1-300
    /// - `dealer_scheme` / `dealer_host` cannot form a dealer page URL
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.fetch_timeout_seconds == 0 || self.fetch_timeout_seconds > 300 {
            anyhow::bail!(
                "FETCH_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.fetch_timeout_seconds
            );
        }

        self.target_template()?;

        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    /// Builds the dealer page template from `DEALER_SCHEME` and `DEALER_HOST`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheme or host is invalid.
    pub fn target_template(&self) -> Result<TargetTemplate> {
        TargetTemplate::new(&self.dealer_scheme, &self.dealer_host)
            .context("Invalid DEALER_SCHEME / DEALER_HOST")
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Fetch backend: {}", self.fetch_backend);
        tracing::info!("  Fetch timeout: {}s", self.fetch_timeout_seconds);
        tracing::info!(
            "  Dealer pages: {}://{{identifier}}.{}",
            self.dealer_scheme,
            self.dealer_host
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
