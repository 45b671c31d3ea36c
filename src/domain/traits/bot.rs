use async_trait::async_trait;
use crate::domain::entities::ReplyPayload;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a reply to a chat, optionally quoting the message it answers
    async fn send_reply(&self, chat_id: &str, reply: &ReplyPayload, reply_to: Option<&str>) -> Result<String, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
