//! Client configuration.
//!
//! The endpoint defaults to the production BIMS URL; both the endpoint and
//! the request timeout can be overridden from the environment or in code.

use std::time::Duration;

/// Production identity endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://bims.barchart.com/authenticate";

/// Whole-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters for [`AuthClient`](crate::AuthClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL the credential payload is POSTed to.
    pub endpoint: String,
    /// Timeout covering connect, send and receive. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Ignore system proxy settings (`HTTP_PROXY` and friends).
    pub disable_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            disable_proxy: false,
        }
    }
}

impl ClientConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                  | Default                                  | Description                       |
    /// |---------------------------|------------------------------------------|-----------------------------------|
    /// | `BIMS_AUTH_URL`           | `https://bims.barchart.com/authenticate` | Identity endpoint                 |
    /// | `BIMS_AUTH_TIMEOUT_SECS`  | `30`                                     | Request timeout, `0` disables it  |
    /// | `BIMS_AUTH_DISABLE_PROXY` | unset                                    | Any value bypasses system proxies |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let endpoint = lookup("BIMS_AUTH_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout = match lookup("BIMS_AUTH_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(DEFAULT_TIMEOUT),
        };

        let disable_proxy = lookup("BIMS_AUTH_DISABLE_PROXY").is_some();

        Self {
            endpoint,
            timeout,
            disable_proxy,
        }
    }

    /// Replace the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace the request timeout (`None` disables it).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bypass (or honour) system proxy settings.
    #[must_use]
    pub fn with_disable_proxy(mut self, disable_proxy: bool) -> Self {
        self.disable_proxy = disable_proxy;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(
        vars: &'a HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn default_points_at_production() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.endpoint, "https://bims.barchart.com/authenticate");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn empty_environment_matches_default() {
        let vars = HashMap::new();
        assert_eq!(ClientConfig::from_lookup(lookup(&vars)), ClientConfig::default());
    }

    #[test]
    fn environment_overrides() {
        let vars = HashMap::from([
            ("BIMS_AUTH_URL", "http://localhost:4100/authenticate"),
            ("BIMS_AUTH_TIMEOUT_SECS", "5"),
            ("BIMS_AUTH_DISABLE_PROXY", "1"),
        ]);
        let cfg = ClientConfig::from_lookup(lookup(&vars));
        assert_eq!(cfg.endpoint, "http://localhost:4100/authenticate");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(5)));
        assert!(cfg.disable_proxy);
    }

    #[test]
    fn zero_timeout_disables_it() {
        let vars = HashMap::from([("BIMS_AUTH_TIMEOUT_SECS", "0")]);
        assert_eq!(ClientConfig::from_lookup(lookup(&vars)).timeout, None);
    }

    #[test]
    fn unparseable_timeout_falls_back() {
        let vars = HashMap::from([("BIMS_AUTH_TIMEOUT_SECS", "soon")]);
        assert_eq!(
            ClientConfig::from_lookup(lookup(&vars)).timeout,
            Some(DEFAULT_TIMEOUT)
        );
    }

    #[test]
    fn builder_overrides() {
        let cfg = ClientConfig::default()
            .with_endpoint("http://127.0.0.1:9/authenticate")
            .with_timeout(None);
        assert_eq!(cfg.endpoint, "http://127.0.0.1:9/authenticate");
        assert!(cfg.timeout.is_none());
    }
}
