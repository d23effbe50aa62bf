//! Wire envelope types for the Wirecon remote-command protocol.
//!
//! One JSON request and one JSON response per exchange. The `command` and
//! `response` fields carry encrypted blobs (base64 of IV plus ciphertext);
//! everything else travels in the clear and feeds key derivation on the
//! receiving side.

use serde::{Deserialize, Serialize};

/// Tag prepended to every command plaintext before encryption.
///
/// The server validates this prefix after decryption, proving the sender
/// held the shared secret for the nonce/timestamp pair in the envelope.
pub const COMMAND_PREFIX: &str = "RCON_";

/// Default TCP port for the command service.
pub const DEFAULT_PORT: u16 = 4161;

/// A command request envelope, client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Account name the shared secret belongs to.
    pub user: String,
    /// Client-generated nonce, 16 random bytes as lowercase hex.
    pub nonce: String,
    /// Unix timestamp (seconds) when the request was built.
    pub timestamp: i64,
    /// Ask the server to queue the command if it cannot run immediately.
    #[serde(default)]
    pub queue: bool,
    /// Encrypted blob of `COMMAND_PREFIX + command`.
    pub command: String,
}

/// A command response envelope, server to client.
///
/// Error responses from the HTTP layer may carry only `success` and
/// `error`; every other field defaults on parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandResponse {
    #[serde(default)]
    pub user: String,
    /// Server-generated nonce; the response key derives from this, not
    /// the request's.
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub timestamp: i64,
    pub success: bool,
    /// Encrypted blob of the command output; decryptable only when
    /// `success` is true.
    #[serde(default)]
    pub response: String,
    /// Server-supplied failure message, empty on success.
    #[serde(default)]
    pub error: String,
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_wire_field_names() {
        let req = CommandRequest {
            user: "admin".into(),
            nonce: "00ff".into(),
            timestamp: 1_700_000_000,
            queue: true,
            command: "AAAA".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["user"], "admin");
        assert_eq!(json["nonce"], "00ff");
        assert_eq!(json["timestamp"], 1_700_000_000);
        assert_eq!(json["queue"], true);
        assert_eq!(json["command"], "AAAA");
    }

    #[test]
    fn request_queue_defaults_to_false_when_absent() {
        let req: CommandRequest = serde_json::from_str(
            r#"{"user":"a","nonce":"b","timestamp":1,"command":"c"}"#,
        )
        .unwrap();
        assert!(!req.queue);
    }

    #[test]
    fn request_missing_required_field_fails_to_parse() {
        let result: Result<CommandRequest, _> =
            serde_json::from_str(r#"{"user":"a","nonce":"b","timestamp":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn bare_error_response_parses_with_defaults() {
        let resp: CommandResponse =
            serde_json::from_str(r#"{"success":false,"error":"bad password"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error, "bad password");
        assert_eq!(resp.user, "");
        assert_eq!(resp.nonce, "");
        assert_eq!(resp.timestamp, 0);
        assert_eq!(resp.response, "");
    }

    #[test]
    fn response_roundtrips_through_json() {
        let resp = CommandResponse {
            user: "admin".into(),
            nonce: "abcd".into(),
            timestamp: 42,
            success: true,
            response: "BBBB".into(),
            error: String::new(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        let back: CommandResponse = serde_json::from_str(&json).unwrap();
        assert!(back.success);
        assert_eq!(back.nonce, "abcd");
        assert_eq!(back.response, "BBBB");
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let resp: CommandResponse = serde_json::from_str(
            r#"{"success":true,"response":"x","plainResponse":"y","nonce":"n","timestamp":2,"user":"u","error":""}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.response, "x");
    }
}
