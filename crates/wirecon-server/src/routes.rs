//! The request pipeline: one POST endpoint, validated in fixed order.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use axum::Router;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::json;
use tracing::{error, info, warn};
use wirecon_crypto::{decrypt, derive_key, encrypt, generate_nonce};
use wirecon_proto::{COMMAND_PREFIX, CommandRequest, CommandResponse};

use crate::config::ServerConfig;
use crate::handler::CommandHandler;
use crate::nonce_guard::{NONCE_EXPIRY, NonceGuard};
use crate::rate_limit::{RATE_WINDOW, RateLimiter};
use crate::users::{User, UserRegistry};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    registry: Arc<UserRegistry>,
    handler: Arc<dyn CommandHandler>,
    nonce_guard: Arc<NonceGuard>,
    rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        registry: UserRegistry,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit_per_minute, RATE_WINDOW));
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            handler,
            nonce_guard: Arc::new(NonceGuard::new(NONCE_EXPIRY)),
            rate_limiter,
        }
    }
}

/// Build the router: a single POST at the root, everything else 404.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(api).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

/// JSON error body with the given status.
fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

/// Effective queue permission: the client must request it, and either
/// the global override or the user's own flag must grant it.
const fn effective_queue(config: &ServerConfig, user: &User, requested: bool) -> bool {
    requested && (config.allow_queue_for_all_users || user.queue)
}

async fn not_found() -> Response {
    reject(StatusCode::NOT_FOUND, "Only POST to / is supported")
}

/// `POST /` — the command endpoint.
async fn api(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    body: String,
) -> Response {
    let ip = peer.ip().to_string();

    if !state.rate_limiter.allow(&ip).await {
        warn!(%ip, "rate limit exceeded");
        return reject(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded");
    }

    let Ok(request) = serde_json::from_str::<CommandRequest>(&body) else {
        warn!(%ip, "malformed request body");
        return reject(StatusCode::BAD_REQUEST, "Invalid or incomplete request body");
    };

    let Some(user) = state.registry.get(&request.user) else {
        warn!(%ip, user = %request.user, "unknown user");
        return reject(StatusCode::UNAUTHORIZED, "Authentication failed");
    };

    let queue = effective_queue(&state.config, user, request.queue);

    let skew = (unix_now() - request.timestamp).abs();
    if skew > state.config.timestamp_window_secs {
        warn!(%ip, user = %user.name, skew, "timestamp out of range");
        return reject(StatusCode::UNAUTHORIZED, "Timestamp out of range");
    }

    if !state.nonce_guard.use_nonce(&request.nonce).await {
        warn!(%ip, user = %user.name, "duplicate nonce");
        return reject(StatusCode::UNAUTHORIZED, "Nonce already used");
    }

    let key = derive_key(user.secret.as_bytes(), &request.nonce, request.timestamp);
    let Ok(plaintext) = decrypt(&request.command, &key) else {
        warn!(%ip, user = %user.name, "command decryption failed");
        return reject(StatusCode::UNAUTHORIZED, "Decryption failed");
    };

    let Some(command) = plaintext.strip_prefix(COMMAND_PREFIX) else {
        warn!(%ip, user = %user.name, "missing command tag");
        return reject(StatusCode::UNAUTHORIZED, "Invalid command format");
    };

    info!(%ip, user = %user.name, command, queue, "command accepted");

    let outcome = match state.handler.execute(user, command, queue).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(%ip, user = %user.name, %err, "command dispatch failed");
            return reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Command execution failed",
            );
        }
    };

    let nonce = generate_nonce();
    let timestamp = unix_now();
    let response_key = derive_key(user.secret.as_bytes(), &nonce, timestamp);
    let Ok(encrypted) = encrypt(&outcome.output, &response_key) else {
        error!(%ip, user = %user.name, "response encryption failed");
        return reject(StatusCode::INTERNAL_SERVER_ERROR, "Encryption failed");
    };

    let envelope = CommandResponse {
        user: request.user,
        nonce,
        timestamp,
        success: outcome.success,
        response: encrypted,
        error: outcome.error.unwrap_or_default(),
    };
    (StatusCode::OK, Json(envelope)).into_response()
}
