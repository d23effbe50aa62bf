//! Client error types.

use wirecon_crypto::CryptoError;

/// Errors from the transport collaborator.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Errors from a single command exchange.
///
/// Every failure is terminal for that call; retry policy belongs to the
/// caller.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Cryptography error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server reported `success: false`. Carries the server's error
    /// text verbatim, or a synthesized message when it sent none.
    #[error("Server rejected request: {0}")]
    Rejected(String),
}
