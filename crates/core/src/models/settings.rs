use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Environment variable overriding [`ClientSettings::base_url`].
pub const ENV_BASE_URL: &str = "INVESTMENT_API_URL";

/// Environment variable overriding [`ClientSettings::timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "INVESTMENT_API_TIMEOUT_SECS";

/// Connection settings for the remote investment API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Root URL of the API, without the `/investments` path (e.g., "http://localhost:8080").
    pub base_url: String,

    /// Per-request timeout in seconds. Ignored on WASM, where the browser owns timeouts.
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientSettings {
    /// Defaults, overridden by `INVESTMENT_API_URL` and
    /// `INVESTMENT_API_TIMEOUT_SECS` when set. The result is validated.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut settings = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            settings.base_url = url;
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            settings.timeout_secs = raw.trim().parse().map_err(|_| {
                CoreError::Configuration(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Check the base URL is an absolute http(s) URL and the timeout is non-zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = reqwest::Url::parse(self.base_url.trim()).map_err(|e| {
            CoreError::Configuration(format!("Invalid API base URL '{}': {e}", self.base_url))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CoreError::Configuration(format!(
                "API base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::Configuration(
                "Request timeout must be at least 1 second".into(),
            ));
        }
        Ok(())
    }

    /// Base URL with surrounding whitespace and trailing slashes removed.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}
