//! The transport collaborator boundary.
//!
//! The protocol core is pure computation around exactly one network call;
//! that call lives behind [`Transport`] so tests can substitute a
//! deterministic peer.

use std::time::Duration;

use async_trait::async_trait;
use wirecon_proto::{CommandRequest, CommandResponse};

use crate::error::TransportError;

/// One synchronous round trip of a request envelope to an endpoint.
///
/// Returns the HTTP status and the parsed response envelope. The body is
/// parsed as a response envelope regardless of status: the server sends
/// error envelopes with 4xx/5xx codes.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn round_trip(
        &self,
        url: &str,
        request: &CommandRequest,
    ) -> Result<(u16, CommandResponse), TransportError>;
}

/// Production transport on reqwest.
#[derive(Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        // Ensure a TLS crypto provider is installed (reqwest uses rustls-no-provider).
        // The `Err` case just means it was already installed — safe to ignore.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn round_trip(
        &self,
        url: &str,
        request: &CommandRequest,
    ) -> Result<(u16, CommandResponse), TransportError> {
        let resp = self.http.post(url).json(request).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let envelope: CommandResponse = serde_json::from_str(&body)?;
        Ok((status, envelope))
    }
}
