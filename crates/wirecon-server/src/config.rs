//! Server configuration.

use std::net::SocketAddr;

use wirecon_proto::DEFAULT_PORT;

/// Configuration for one server instance.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Maximum accepted clock skew between client and server, seconds.
    pub timestamp_window_secs: i64,
    /// Per-IP request budget within a sliding one-minute window.
    pub rate_limit_per_minute: usize,
    /// Grant the queue permission to every user regardless of their
    /// per-user flag.
    pub allow_queue_for_all_users: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            timestamp_window_secs: 60,
            rate_limit_per_minute: 30,
            allow_queue_for_all_users: false,
        }
    }
}
