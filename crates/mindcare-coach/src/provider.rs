use async_trait::async_trait;

use crate::error::CoachError;

/// A single-turn chat-completion backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Send a system prompt and one user message, return the reply text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, CoachError>;
}
