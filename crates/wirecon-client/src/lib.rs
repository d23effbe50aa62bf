//! Client library for the Wirecon encrypted remote-command protocol.
//!
//! Each call is a single-shot exchange: build a request envelope under a
//! freshly derived key, POST it to the service, and open the response
//! envelope under the key its own nonce and timestamp describe. No state
//! is kept between calls and nothing is retried.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod transport;

pub use client::Client;
pub use config::ClientConfig;
pub use envelope::{build_request, open_response};
pub use error::{ClientError, TransportError};
pub use transport::{HttpTransport, Transport};
