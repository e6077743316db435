pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

/// A message received from any platform
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Platform identifier (e.g., "telegram")
    pub platform: String,
    /// Platform-specific user ID as string
    pub user_id: String,
    /// Display name of the user
    pub user_name: String,
    /// Platform-specific chat/channel ID as string
    pub chat_id: String,
    /// Platform-specific message ID, used to thread replies
    pub message_id: String,
    /// The message text
    pub text: String,
}

/// Address of a message the bot has posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: String,
    pub message_id: String,
}

/// Outbound operations the handlers need from a chat platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Reply to `to` in its chat with `text`.
    async fn reply(&self, to: &IncomingMessage, text: &str) -> Result<SentMessage>;

    /// Replace the text of a previously sent message.
    async fn edit(&self, message: &SentMessage, text: &str) -> Result<()>;
}
