//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `iotfleet.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::str::FromStr;
use std::time::Duration;

use iotfleet_adapter_iotronic::IotronicConfig;
use serde::Deserialize;
use url::Url;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Which management API implementation to serve from.
    pub backend: Backend,
    /// Remote management API settings, used by [`Backend::Iotronic`].
    pub iotronic: IotronicConfig,
    /// Status reconciliation settings.
    pub reconciler: ReconcilerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Management API implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The remote REST API.
    #[default]
    Iotronic,
    /// In-memory demo data, no network access.
    Demo,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iotronic" => Ok(Self::Iotronic),
            "demo" => Ok(Self::Demo),
            other => Err(ConfigError::Validation(format!("unknown backend `{other}`"))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Deadline for each per-board remote call, in milliseconds.
    pub call_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `iotfleet.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("iotfleet.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("IOTFLEET_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("IOTFLEET_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("IOTFLEET_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("IOTFLEET_BACKEND") {
            self.backend = val.parse()?;
        }
        if let Some(val) = var("IOTFLEET_IOTRONIC_URL") {
            self.iotronic.base_url = val;
        }
        if let Some(val) = var("IOTFLEET_IOTRONIC_TOKEN") {
            self.iotronic.auth_token = Some(val).filter(|token| !token.is_empty());
        }
        if let Some(val) = var("IOTFLEET_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.reconciler.call_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "reconciler call timeout must be non-zero".to_string(),
            ));
        }
        if self.backend == Backend::Iotronic {
            Url::parse(&self.iotronic.base_url).map_err(|err| {
                ConfigError::Validation(format!(
                    "invalid management API URL `{}`: {err}",
                    self.iotronic.base_url
                ))
            })?;
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Per-call deadline of the status reconciler.
    #[must_use]
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.reconciler.call_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: 10_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "iotfleetd=info,iotfleet=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
