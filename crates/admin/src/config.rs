//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ZIAMIA_API_KEY` - Bearer key for write requests to the record store
//!
//! ## Optional
//! - `ZIAMIA_STORE_URL` - Root URL of the record store (default: `http://localhost:3000/`)

use secrecy::SecretString;
use url::Url;
use zia_mia_core::config::{ConfigError, env_lookup, get_or_default, get_validated_secret};

const DEFAULT_STORE_URL: &str = "http://localhost:3000/";

/// Record store connection settings.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct StoreConfig {
    /// Root URL; collection names are appended to it
    pub base_url: Url,
    /// Bearer key sent with every request
    pub api_key: SecretString,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl StoreConfig {
    /// Create a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, api_key: SecretString) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API key is missing or looks insecure, or
    /// if the store URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&env_lookup)
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`StoreConfig::from_env`].
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = get_or_default(lookup, "ZIAMIA_STORE_URL", DEFAULT_STORE_URL);
        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            api_key: get_validated_secret(lookup, "ZIAMIA_API_KEY")?,
        })
    }
}

/// Parse the store root, making sure it ends in `/` so `Url::join` appends
/// collection names instead of replacing the last segment.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash)
        .map_err(|e| ConfigError::InvalidEnvVar("ZIAMIA_STORE_URL".to_string(), e.to_string()))
}
