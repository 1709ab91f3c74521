//! Gateway configuration and credential resolution.
//!
//! The transport never reads the process environment: credentials are
//! resolved here, at construction time, and handed over as explicit values.

use crate::error::{Error, Result};
use secrecy::SecretString;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Production Holded API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.holded.com/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base delay for linear rate-limit backoff, in milliseconds.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Maximum number of retries after a 429 response (3 attempts total).
pub const MAX_RATE_LIMIT_RETRIES: u32 = 2;

/// Environment variable holding the default API key.
pub const API_KEY_ENV: &str = "HOLDED_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "HOLDED_API_URL";

/// Configuration for a Holded gateway instance.
///
/// Immutable once handed to a [`crate::Transport`]; a configured transport
/// holds no process-wide mutable state.
#[derive(Debug, Clone, Validate)]
pub struct GatewayConfig {
    /// Base URL of the remote API
    #[validate(url)]
    pub base_url: String,

    /// API key, sent as the `key` header on every request
    pub api_key: SecretString,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,

    /// Base delay for the linear rate-limit backoff, in milliseconds
    pub retry_base_delay_ms: u64,
}

impl GatewayConfig {
    /// Create a configuration for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a configuration with an explicit base URL (e.g. for testing).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is invalid or validation fails.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let config = Self {
            base_url: base_url.into(),
            api_key: SecretString::from(api_key.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        };

        config
            .validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Resolve the configuration from the process environment.
    ///
    /// Key resolution order:
    /// 1. `HOLDED_API_KEY_<PROFILE>` when a profile is given (upper-cased,
    ///    dashes replaced with underscores)
    /// 2. `HOLDED_API_KEY` otherwise
    ///
    /// `HOLDED_API_URL` overrides the base URL when set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the missing environment variable.
    pub fn from_env(profile: Option<&str>) -> Result<Self> {
        let api_key = match profile {
            Some(profile) => {
                let var = profile_env_var(profile);
                std::env::var(&var).map_err(|_| {
                    Error::Config(format!(
                        "No API key found for profile \"{profile}\". Set the {var} environment variable."
                    ))
                })?
            }
            None => std::env::var(API_KEY_ENV).map_err(|_| {
                Error::Config(format!(
                    "No API key found. Set the {API_KEY_ENV} environment variable or use a profile."
                ))
            })?,
        };

        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::with_base_url(api_key, base_url)
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set the base delay for the linear rate-limit backoff.
    #[must_use]
    pub const fn with_retry_base_delay_ms(mut self, millis: u64) -> Self {
        self.retry_base_delay_ms = millis;
        self
    }

    /// Get the request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL: {e}")))
    }
}

/// Environment variable name for a profile-scoped API key.
#[must_use]
pub fn profile_env_var(profile: &str) -> String {
    format!(
        "HOLDED_API_KEY_{}",
        profile.to_uppercase().replace('-', "_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_config_defaults() {
        let config = GatewayConfig::new("test-key").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.retry_base_delay_ms, DEFAULT_RETRY_BASE_DELAY_MS);
        assert_eq!(config.api_key.expose_secret(), "test-key");
    }

    #[test]
    fn test_config_invalid_url() {
        let result = GatewayConfig::with_base_url("test-key", "not-a-url");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = GatewayConfig::new("test-key")
            .unwrap()
            .with_timeout(60)
            .with_retry_base_delay_ms(50);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.retry_base_delay_ms, 50);
    }

    #[test]
    fn test_parse_base_url() {
        let config = GatewayConfig::with_base_url("k", "https://example.com:8443/api").unwrap();
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn test_profile_env_var_name() {
        assert_eq!(profile_env_var("acme"), "HOLDED_API_KEY_ACME");
        assert_eq!(profile_env_var("acme-co"), "HOLDED_API_KEY_ACME_CO");
    }

    #[test]
    fn test_from_env_missing_profile_key() {
        let err = GatewayConfig::from_env(Some("definitely-unset-profile")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err
            .to_string()
            .contains("HOLDED_API_KEY_DEFINITELY_UNSET_PROFILE"));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let config = GatewayConfig::new("super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }
}
