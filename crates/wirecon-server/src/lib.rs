//! Server side of the Wirecon encrypted remote-command protocol.
//!
//! A single POST endpoint authenticates, decrypts, and dispatches command
//! envelopes, then answers with an encrypted response envelope under a
//! fresh server-side key. Command execution itself stays behind the
//! [`CommandHandler`] collaborator.
//!
//! Request validation order (each rejection is a JSON error body):
//! rate limit, body shape, user, timestamp window, nonce replay,
//! decryption, command tag. Crypto rejections all answer 401 without
//! telling the caller which step failed.

pub mod config;
pub mod handler;
pub mod nonce_guard;
pub mod rate_limit;
pub mod routes;
pub mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

pub use config::ServerConfig;
pub use handler::{CommandHandler, CommandOutcome};
pub use routes::{AppState, build_router};
pub use users::{User, UserRegistry};

/// Bind and run the server until the task is cancelled or the listener
/// fails.
pub async fn serve(
    config: ServerConfig,
    registry: UserRegistry,
    handler: Arc<dyn CommandHandler>,
) -> std::io::Result<()> {
    let addr = config.bind_addr;
    if registry.is_empty() {
        warn!("user registry is empty; every request will be rejected");
    }
    info!(%addr, users = registry.len(), "wirecon server listening");
    let app = build_router(AppState::new(config, registry, handler));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
