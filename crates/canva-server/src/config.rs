//! Server configuration

use canva_client::ClientConfig;
use serde::{Deserialize, Serialize};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Server configuration
///
/// Read from an optional `config/server.{toml,yaml,json}` file, then from
/// `CANVA_SERVER_*` environment variables. Nested keys use `__`, e.g.
/// `CANVA_SERVER_CANVA__BASE_URL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    pub log_format: LogFormat,

    /// Canva client settings (base URL, timeout, API key variable)
    pub canva: ClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            canva: ClientConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        Self::load_from("config/server")
    }

    /// Load configuration from an optional file (extension inferred) and
    /// `CANVA_SERVER_*` environment variables
    ///
    /// A missing file is fine; a file that exists but does not parse is an
    /// error.
    pub fn load_from(file: &str) -> anyhow::Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("CANVA_SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", file, e))?;

        cfg.try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.host.trim().is_empty() {
            anyhow::bail!("host must not be empty");
        }
        self.canva
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid canva configuration: {}", e))
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
