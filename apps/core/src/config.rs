//! Client configuration, read from the environment.

use crate::error::AppError;
use std::env;
use std::time::Duration;
use url::Url;
use validator::Validate;

// --- Constants ---
pub const SERVER_URL_VAR: &str = "BIAS_LENS_SERVER_URL";
pub const ERROR_DISMISS_MS_VAR: &str = "BIAS_LENS_ERROR_DISMISS_MS";
pub const REQUEST_TIMEOUT_SECS_VAR: &str = "BIAS_LENS_REQUEST_TIMEOUT_SECS";

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_ERROR_DISMISS_MS: u64 = 5000;

/// Settings for the analysis client.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ClientConfig {
    /// Base URL of the analysis service; `/analyze` is resolved against it.
    #[validate(url)]
    pub server_url: String,
    /// How long an error message stays visible.
    #[validate(range(min = 1))]
    pub error_dismiss_ms: u64,
    /// Optional whole-request timeout. `None` waits for the transport indefinitely.
    #[validate(range(min = 1))]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            error_dismiss_ms: DEFAULT_ERROR_DISMISS_MS,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            server_url: env::var(SERVER_URL_VAR).unwrap_or(defaults.server_url),
            error_dismiss_ms: parse_var(ERROR_DISMISS_MS_VAR)?.unwrap_or(defaults.error_dismiss_ms),
            request_timeout_secs: parse_var(REQUEST_TIMEOUT_SECS_VAR)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// The full URL of the analysis endpoint.
    pub fn analyze_url(&self) -> Result<Url, AppError> {
        let mut base = Url::parse(&self.server_url)?;
        // Keep any path prefix of the base URL.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join("analyze")?)
    }

    pub fn error_dismiss_after(&self) -> Duration {
        Duration::from_millis(self.error_dismiss_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_var(name: &str) -> Result<Option<u64>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} must be a positive integer: {}", name, e))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::Config(format!("{}: {}", name, e))),
    }
}
