//! Single-shot command client.

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::ClientError;
use crate::transport::{HttpTransport, Transport};

/// A client for the Wirecon remote-command service.
///
/// Stateless between calls: every [`send_command`](Self::send_command)
/// derives its own keys and either completes or fails on its own.
#[derive(Debug)]
pub struct Client<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<HttpTransport> {
    /// Create a client with the production HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config.timeout).map_err(ClientError::Transport)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Client<T> {
    /// Create a client over a custom transport.
    pub const fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one command and return its decrypted output.
    ///
    /// Builds the request envelope, performs the single transport round
    /// trip, and opens the response. A `success: false` envelope surfaces
    /// as [`ClientError::Rejected`] with the server's error text, or a
    /// synthesized message naming the HTTP status when the text is empty.
    pub async fn send_command(&self, command: &str, queue: bool) -> Result<String, ClientError> {
        let request =
            envelope::build_request(&self.config.user, &self.config.secret, command, queue)?;
        debug!(user = %request.user, queue, "sending command request");

        let url = self.config.endpoint_url();
        let (status, response) = self.transport.round_trip(&url, &request).await?;

        if response.success {
            let output = envelope::open_response(&self.config.secret, &response)?;
            debug!(status, "command completed");
            return Ok(output);
        }

        let message = if response.error.is_empty() {
            format!("Request failed (HTTP {status})")
        } else {
            response.error
        };
        warn!(status, error = %message, "command rejected by server");
        Err(ClientError::Rejected(message))
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use wirecon_crypto::{decrypt, derive_key, encrypt, generate_nonce};
    use wirecon_proto::{COMMAND_PREFIX, CommandRequest, CommandResponse};

    use super::*;
    use crate::error::TransportError;

    const SECRET: &str = "hunter2";

    fn test_config() -> ClientConfig {
        ClientConfig::new("localhost", "admin", SECRET)
    }

    /// In-process peer that decrypts the request and echoes the command
    /// back in a properly encrypted response envelope.
    struct EchoTransport;

    #[async_trait]
    impl Transport for EchoTransport {
        async fn round_trip(
            &self,
            _url: &str,
            request: &CommandRequest,
        ) -> Result<(u16, CommandResponse), TransportError> {
            let key = derive_key(SECRET.as_bytes(), &request.nonce, request.timestamp);
            let plaintext = decrypt(&request.command, &key).unwrap();
            let command = plaintext.strip_prefix(COMMAND_PREFIX).unwrap();

            let nonce = generate_nonce();
            let timestamp = request.timestamp + 1;
            let response_key = derive_key(SECRET.as_bytes(), &nonce, timestamp);
            Ok((
                200,
                CommandResponse {
                    user: request.user.clone(),
                    nonce,
                    timestamp,
                    success: true,
                    response: encrypt(&format!("echo: {command}"), &response_key).unwrap(),
                    error: String::new(),
                },
            ))
        }
    }

    /// Peer that always answers with a fixed status and envelope.
    struct FixedTransport {
        status: u16,
        response: CommandResponse,
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn round_trip(
            &self,
            _url: &str,
            _request: &CommandRequest,
        ) -> Result<(u16, CommandResponse), TransportError> {
            Ok((self.status, self.response.clone()))
        }
    }

    #[tokio::test]
    async fn send_command_round_trips_through_the_envelope() {
        let client = Client::with_transport(test_config(), EchoTransport);
        let output = client.send_command("say hi", true).await.unwrap();
        assert_eq!(output, "echo: say hi");
    }

    #[tokio::test]
    async fn server_error_text_is_surfaced_verbatim() {
        let client = Client::with_transport(
            test_config(),
            FixedTransport {
                status: 401,
                response: CommandResponse {
                    success: false,
                    error: "bad password".into(),
                    ..CommandResponse::default()
                },
            },
        );
        let err = client.send_command("say hi", false).await.unwrap_err();
        match err {
            ClientError::Rejected(message) => assert_eq!(message, "bad password"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_error_text_synthesizes_a_status_message() {
        let client = Client::with_transport(
            test_config(),
            FixedTransport {
                status: 500,
                response: CommandResponse {
                    success: false,
                    ..CommandResponse::default()
                },
            },
        );
        let err = client.send_command("say hi", false).await.unwrap_err();
        match err {
            ClientError::Rejected(message) => {
                assert_eq!(message, "Request failed (HTTP 500)");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecryptable_success_response_is_a_crypto_error() {
        let client = Client::with_transport(
            test_config(),
            FixedTransport {
                status: 200,
                response: CommandResponse {
                    nonce: generate_nonce(),
                    timestamp: 1,
                    success: true,
                    response: "AAAA".into(), // 3 decoded bytes, no room for an IV
                    ..CommandResponse::default()
                },
            },
        );
        let err = client.send_command("say hi", false).await.unwrap_err();
        assert!(matches!(err, ClientError::Crypto(_)), "got {err:?}");
    }
}
