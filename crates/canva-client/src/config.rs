//! Client configuration
//!
//! Where the endpoint methods send their requests, how long a single request
//! may take, and which environment variable holds the API key.

use crate::error::{CanvaError, Result};
use serde::{Deserialize, Serialize};

/// Production base URL of the Canva Connect REST API
pub const DEFAULT_BASE_URL: &str = "https://api.canva.com/rest";

/// Environment variable read for the API key
pub const DEFAULT_API_KEY_ENV: &str = "CANVA_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

/// Canva client configuration
///
/// # Examples
///
/// ```rust
/// use canva_client::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://127.0.0.1:9000/rest")
///     .with_timeout_secs(5);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every path template is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl ClientConfig {
    /// Point the client at another base URL (e.g. a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the environment variable the API key is read from
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = name.into();
        self
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = self.normalized_base_url();
        if base_url.is_empty() {
            return Err(CanvaError::InvalidConfiguration(
                "base_url must not be empty".to_string(),
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CanvaError::InvalidConfiguration(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CanvaError::InvalidConfiguration(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(CanvaError::InvalidConfiguration(
                "api_key_env must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
