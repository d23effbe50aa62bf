//! Command execution collaborator.
//!
//! The protocol pipeline authenticates and decrypts; what a command
//! actually *does* is injected behind [`CommandHandler`].

use async_trait::async_trait;

use crate::users::User;

/// Result of executing one command.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// Whether the command ran successfully.
    pub success: bool,
    /// Command output; encrypted into the response envelope.
    pub output: String,
    /// Failure message for the envelope's `error` field.
    pub error: Option<String>,
}

impl CommandOutcome {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
        }
    }
}

/// Executes an authenticated, decrypted command.
///
/// `queue` is the effective queue permission after the per-user and
/// global flags are applied. Returning `Err` means dispatch itself
/// broke; a command that ran and failed is an `Ok` outcome with
/// `success: false`.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        user: &User,
        command: &str,
        queue: bool,
    ) -> anyhow::Result<CommandOutcome>;
}
