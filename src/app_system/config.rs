use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Base URL of the remote product service. Overridable for local
/// backends via `GROCERY_API_URL`.
pub const DEFAULT_API_URL: &str = "https://grocerybackend.up.railway.app/product";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Reads `GROCERY_API_URL` and `GROCERY_API_TIMEOUT_SECS`, falling
    /// back to the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url_text = lookup("GROCERY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&url_text).map_err(|e| ConfigError::InvalidUrl {
            value: url_text,
            reason: e.to_string(),
        })?;

        let request_timeout = match lookup("GROCERY_API_TIMEOUT_SECS") {
            Some(text) => {
                let secs: u64 = text
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout { value: text })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url,
            request_timeout,
        })
    }
}
