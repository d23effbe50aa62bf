//! Client configuration.

use std::time::Duration;

use wirecon_proto::DEFAULT_PORT;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for one client instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service host name or address.
    pub host: String,
    /// Service port.
    pub port: u16,
    /// Account name the shared secret belongs to.
    pub user: String,
    /// Shared secret, exchanged out-of-band. Never transmitted.
    pub secret: String,
    /// Request timeout, imposed at the transport boundary.
    pub timeout: Duration,
    /// Use `https` instead of `http`. Affects only scheme selection;
    /// certificate configuration is the transport's concern.
    pub use_tls: bool,
}

impl ClientConfig {
    /// Create a config with the default port, timeout, and plain HTTP.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            user: user.into(),
            secret: secret.into(),
            timeout: DEFAULT_TIMEOUT,
            use_tls: false,
        }
    }

    /// The endpoint URL: a single POST of a JSON body goes here.
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{scheme}://{}:{}/", self.host, self.port)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_plain_http_on_the_service_port() {
        let config = ClientConfig::new("mc.example.net", "admin", "hunter2");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.endpoint_url(), "http://mc.example.net:4161/");
    }

    #[test]
    fn tls_flag_switches_scheme_only() {
        let mut config = ClientConfig::new("mc.example.net", "admin", "hunter2");
        config.use_tls = true;
        config.port = 8443;
        assert_eq!(config.endpoint_url(), "https://mc.example.net:8443/");
    }
}
