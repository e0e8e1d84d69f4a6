use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::{ChatMessage, ChatSettings};

/// Trait for chat-completion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send `messages` and return the text of the first completion choice
    async fn complete(
        &self,
        settings: &ChatSettings,
        messages: &[ChatMessage],
    ) -> VectorResult<String>;
}
