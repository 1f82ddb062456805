//! Endpoint configuration shared by every component of a client.
//!
//! An [`EndpointConfig`] is validated once, when the client is built, and is
//! then immutable. The HTTP transport owns it; the log stream borrows it to
//! derive its WebSocket address.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::AuthToken;

/// Per-attempt socket timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Problems found while validating an [`EndpointConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No endpoint was supplied.
    #[error("endpoint must not be empty")]
    MissingEndpoint,

    /// The endpoint does not look like an absolute `http` or `https` address.
    #[error("endpoint '{endpoint}' must start with http:// or https://")]
    UnsupportedScheme {
        /// The rejected endpoint.
        endpoint: String,
    },

    /// No token was supplied.
    #[error("token must not be empty")]
    MissingToken,

    /// A timeout of zero would fail every request immediately.
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Raw, serde-friendly form of the configuration, e.g. as read from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEndpointConfig {
    /// Base URL of the panel, e.g. `https://panel.example.com`.
    pub endpoint: String,
    /// API token.
    pub token: String,
    /// Per-attempt socket timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Overall deadline in seconds covering every attempt of one call.
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

/// Validated endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    endpoint: String,
    token: AuthToken,
    timeout: Duration,
    deadline: Option<Duration>,
}

impl EndpointConfig {
    /// Creates a configuration with the default timeout and no deadline.
    ///
    /// A trailing `/` on the endpoint is dropped so that routes can be appended
    /// directly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the endpoint is empty or not `http(s)`, or if
    /// the token is empty.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme { endpoint });
        }
        let token = AuthToken::new(token).ok_or(ConfigError::MissingToken)?;

        Ok(Self {
            endpoint,
            token,
            timeout: DEFAULT_TIMEOUT,
            deadline: None,
        })
    }

    /// Replaces the per-attempt socket timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero duration.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Sets an overall deadline shared by both attempts of a call.
    ///
    /// The clock starts afresh for every call. To bound a single call more
    /// tightly, wrap its future in `tokio::time::timeout`: dropping the
    /// future abandons the call, including a pending retry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero duration.
    pub fn with_deadline(mut self, deadline: Duration) -> Result<Self, ConfigError> {
        if deadline.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        self.deadline = Some(deadline);
        Ok(self)
    }

    /// Base URL without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The API token.
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Per-attempt socket timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Overall call deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Whether the endpoint uses TLS.
    pub fn is_secure(&self) -> bool {
        self.endpoint.starts_with("https://")
    }
}

impl TryFrom<RawEndpointConfig> for EndpointConfig {
    type Error = ConfigError;

    fn try_from(raw: RawEndpointConfig) -> Result<Self, Self::Error> {
        let mut config = EndpointConfig::new(raw.endpoint, raw.token)?;
        if let Some(secs) = raw.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs))?;
        }
        if let Some(secs) = raw.deadline_secs {
            config = config.with_deadline(Duration::from_secs(secs))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = EndpointConfig::new("https://panel.example.com/", "tok").unwrap();
        assert_eq!(config.endpoint(), "https://panel.example.com");
        assert!(config.is_secure());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.deadline(), None);
    }

    #[test]
    fn rejects_missing_or_foreign_endpoints() {
        assert_eq!(
            EndpointConfig::new("", "tok").unwrap_err(),
            ConfigError::MissingEndpoint
        );
        assert!(matches!(
            EndpointConfig::new("ftp://panel", "tok").unwrap_err(),
            ConfigError::UnsupportedScheme { .. }
        ));
        assert_eq!(
            EndpointConfig::new("http://panel", "").unwrap_err(),
            ConfigError::MissingToken
        );
    }

    #[test]
    fn raw_config_applies_durations() {
        let raw: RawEndpointConfig = serde_json::from_str(
            r#"{"endpoint":"http://localhost:3000","token":"t","timeout_secs":5,"deadline_secs":12}"#,
        )
        .unwrap();
        let config = EndpointConfig::try_from(raw).unwrap();
        assert!(!config.is_secure());
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.deadline(), Some(Duration::from_secs(12)));
    }

    #[test]
    fn zero_durations_are_rejected() {
        let config = EndpointConfig::new("http://panel", "t").unwrap();
        assert_eq!(
            config.clone().with_timeout(Duration::ZERO).unwrap_err(),
            ConfigError::ZeroTimeout
        );
        assert_eq!(
            config.with_deadline(Duration::ZERO).unwrap_err(),
            ConfigError::ZeroTimeout
        );
    }
}
