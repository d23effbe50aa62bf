//! Building request envelopes and opening response envelopes.
//!
//! The request key and the response key are independent even within one
//! round trip: each side derives from its own nonce and timestamp, and
//! tells the peer both in the clear so the peer can recompute the key.

use std::time::{SystemTime, UNIX_EPOCH};

use wirecon_crypto::{CryptoError, decrypt, derive_key, encrypt, generate_nonce};
use wirecon_proto::{COMMAND_PREFIX, CommandRequest, CommandResponse};

/// Current Unix timestamp in seconds.
fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

/// Build a request envelope for one command.
///
/// Generates a fresh nonce, captures the current time, derives the
/// request key, and encrypts `RCON_` plus the command under it.
pub fn build_request(
    user: &str,
    secret: &str,
    command: &str,
    queue: bool,
) -> Result<CommandRequest, CryptoError> {
    let nonce = generate_nonce();
    let timestamp = unix_now();
    let key = derive_key(secret.as_bytes(), &nonce, timestamp);
    let command = encrypt(&format!("{COMMAND_PREFIX}{command}"), &key)?;
    Ok(CommandRequest {
        user: user.to_owned(),
        nonce,
        timestamp,
        queue,
        command,
    })
}

/// Decrypt the payload of a successful response envelope.
///
/// The key derives from the response's own nonce and timestamp, not the
/// request's.
pub fn open_response(secret: &str, response: &CommandResponse) -> Result<String, CryptoError> {
    let key = derive_key(secret.as_bytes(), &response.nonce, response.timestamp);
    decrypt(&response.response, &key)
}
