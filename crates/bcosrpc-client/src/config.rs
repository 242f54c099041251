use std::time::Duration;

use bcosrpc_common::transport::http::validate_endpoint;
use bcosrpc_common::{BcosRpcError, Result};

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8545";

/// Environment variable holding the node's RPC URL.
pub const ENDPOINT_ENV: &str = "BCOS_RPC_URL";

/// Environment variable holding the per-request timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "BCOS_RPC_TIMEOUT_MS";

/// Connection settings for [`GroupClient`](crate::GroupClient).
///
/// # Default Configuration
///
/// - `endpoint`: `http://127.0.0.1:8545`
/// - `request_timeout`: 30 seconds per HTTP exchange
/// - `call_timeout`: none; only the caller's context bounds a call
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use bcosrpc_client::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_endpoint("http://10.0.0.5:8545")
///     .with_request_timeout(Duration::from_secs(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Node RPC URL; must start with `http://`
    pub endpoint: String,
    /// Upper bound for one HTTP request/response exchange
    pub request_timeout: Duration,
    /// Deadline added to every call's context
    pub call_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(30),
            call_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by [`ENDPOINT_ENV`] and [`TIMEOUT_ENV`] when set.
    ///
    /// # Errors
    ///
    /// Returns [`BcosRpcError::InvalidRequest`] if the timeout variable is not
    /// a whole number of milliseconds.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                BcosRpcError::InvalidRequest(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    TIMEOUT_ENV, raw
                ))
            })?;
            config.request_timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Checks the endpoint scheme and that no timeout is zero.
    pub fn validate(&self) -> Result<()> {
        validate_endpoint(&self.endpoint)?;

        if self.request_timeout.is_zero() {
            return Err(BcosRpcError::InvalidRequest(
                "request_timeout must be greater than zero".to_string(),
            ));
        }

        if self.call_timeout.is_some_and(|t| t.is_zero()) {
            return Err(BcosRpcError::InvalidRequest(
                "call_timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:8545");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.call_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_vars_without_overrides() {
        let config = ClientConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_vars_with_overrides() {
        let config = ClientConfig::from_vars(vars(&[
            (ENDPOINT_ENV, "http://10.0.0.5:20200"),
            (TIMEOUT_ENV, " 2500 "),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.5:20200");
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_from_vars_rejects_bad_timeout() {
        let result = ClientConfig::from_vars(vars(&[(TIMEOUT_ENV, "soon")]));
        assert!(matches!(result, Err(BcosRpcError::InvalidRequest(_))));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_endpoint("http://node:8545")
            .with_request_timeout(Duration::from_secs(2))
            .with_call_timeout(Duration::from_secs(10));
        assert_eq!(config.endpoint, "http://node:8545");
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.call_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let config = ClientConfig::default().with_request_timeout(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = ClientConfig::default().with_call_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_endpoint() {
        let config = ClientConfig::default().with_endpoint("127.0.0.1:8545");
        assert!(matches!(config.validate(), Err(BcosRpcError::InvalidRequest(_))));
    }
}
