//! Completion service - the external language model that drafts notices.

pub mod groq;

pub use groq::GroqClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("failed to build completion client: {0}")]
    Client(String),
    #[error("completion request timed out")]
    Timeout,
    #[error("could not reach completion service: {0}")]
    Network(String),
    #[error("completion service rejected the API key (HTTP {0})")]
    Unauthorized(u16),
    #[error("completion service rate limit exceeded")]
    RateLimited,
    #[error("completion service error (HTTP {status}): {body}")]
    Server { status: u16, body: String },
    #[error("unexpected completion response (HTTP {status}): {body}")]
    Status { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    Malformed(String),
}

impl CompletionError {
    /// Whether another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Network(_) | Self::RateLimited | Self::Server { .. }
        )
    }
}

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
