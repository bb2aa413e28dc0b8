//! Iotronic API configuration.

use serde::Deserialize;

/// Connection settings for the remote management API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IotronicConfig {
    /// Base URL of the API, without the `/v1` prefix.
    pub base_url: String,
    /// Token sent as `X-Auth-Token` on every request.
    pub auth_token: Option<String>,
    /// Client-wide request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for IotronicConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8812".to_string(),
            auth_token: None,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = IotronicConfig::default();
        assert_eq!(config.base_url, "http://localhost:8812");
        assert!(config.auth_token.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            base_url = "https://iot.example.com/api"
            auth_token = "gAAAAABk"
            timeout_secs = 5
        "#;
        let config: IotronicConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "https://iot.example.com/api");
        assert_eq!(config.auth_token.as_deref(), Some("gAAAAABk"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: IotronicConfig = toml::from_str(r#"auth_token = "t""#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8812");
        assert_eq!(config.timeout_secs, 30);
    }
}
