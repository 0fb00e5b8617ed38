//! Service configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::Result;

/// Gazelle (backend) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GazelleConfig {
    /// HTTP listen port.
    #[serde(default = "default_gazelle_port")]
    pub port: u16,

    /// Seconds to wait for in-flight requests after a shutdown signal.
    #[serde(default = "default_grace_secs")]
    pub shutdown_grace_secs: u64,
}

/// Hippo (frontend) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HippoConfig {
    /// Backend URL, read from `GAZELLE`.
    #[serde(default)]
    pub gazelle: Option<String>,

    /// HTTP listen port.
    #[serde(default = "default_hippo_port")]
    pub port: u16,

    /// Timeout for the backend call in milliseconds.
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    /// Seconds to wait for in-flight requests after a shutdown signal.
    #[serde(default = "default_grace_secs")]
    pub shutdown_grace_secs: u64,
}

fn default_gazelle_port() -> u16 {
    3000
}

fn default_hippo_port() -> u16 {
    5000
}

fn default_upstream_timeout_ms() -> u64 {
    5000
}

fn default_grace_secs() -> u64 {
    10
}

impl GazelleConfig {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Shutdown grace period.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for GazelleConfig {
    fn default() -> Self {
        Self {
            port: default_gazelle_port(),
            shutdown_grace_secs: default_grace_secs(),
        }
    }
}

impl HippoConfig {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.backend_url()?;

        if self.upstream_timeout_ms == 0 {
            return Err("UPSTREAM_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Parse `GAZELLE` into the backend base URL.
    pub fn backend_url(&self) -> std::result::Result<Url, String> {
        let raw = match self.gazelle.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err("GAZELLE is required: backend wasn't specified".to_string()),
        };

        let url = Url::parse(raw).map_err(|e| format!("GAZELLE is not a valid URL: {}", e))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(format!("GAZELLE must use http or https, got {}", other)),
        }
    }

    /// Timeout applied to the backend call.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    /// Shutdown grace period.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hippo_config(gazelle: Option<&str>) -> HippoConfig {
        HippoConfig {
            gazelle: gazelle.map(str::to_string),
            port: default_hippo_port(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            shutdown_grace_secs: default_grace_secs(),
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_gazelle_port(), 3000);
        assert_eq!(default_hippo_port(), 5000);
        assert_eq!(hippo_config(None).upstream_timeout(), Duration::from_secs(5));
        assert_eq!(GazelleConfig::default().shutdown_grace(), Duration::from_secs(10));
    }

    #[test]
    fn validate_rejects_missing_backend() {
        let err = hippo_config(None).validate().unwrap_err();
        assert!(err.contains("GAZELLE"));
    }

    #[test]
    fn validate_rejects_blank_backend() {
        assert!(hippo_config(Some("   ")).validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        assert!(hippo_config(Some("ftp://gazelle/info")).validate().is_err());
        assert!(hippo_config(Some("not a url")).validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = hippo_config(Some("http://gazelle:3000"));
        config.upstream_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_http_backend() {
        let config = hippo_config(Some("http://gazelle:3000"));
        assert!(config.validate().is_ok());
        assert_eq!(config.backend_url().unwrap().host_str(), Some("gazelle"));
    }

    #[test]
    fn deserializes_from_env_style_pairs() {
        let vars = vec![
            ("GAZELLE".to_string(), "http://gazelle:3000".to_string()),
            ("PORT".to_string(), "8081".to_string()),
        ];

        let config: HippoConfig = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.gazelle.as_deref(), Some("http://gazelle:3000"));
        assert_eq!(config.upstream_timeout_ms, 5000);
    }

    #[test]
    fn gazelle_port_rejects_garbage() {
        let vars = vec![("PORT".to_string(), "not-a-port".to_string())];
        assert!(envy::from_iter::<_, GazelleConfig>(vars).is_err());
    }
}
