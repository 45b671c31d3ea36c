//! Message dispatcher - Routes messages to command handlers

use std::sync::Arc;
use crate::application::services::CommandService;
use crate::domain::entities::Message;
use crate::domain::traits::Bot;
use super::parser::MessageParser;

/// Parses a message, runs the command and sends exactly one reply
pub struct MessageDispatcher<B: Bot> {
    bot: Arc<B>,
    parser: MessageParser,
    commands: CommandService,
}

impl<B: Bot> MessageDispatcher<B> {
    pub fn new(bot: Arc<B>, parser: MessageParser, commands: CommandService) -> Self {
        Self { bot, parser, commands }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// Handle one incoming message. Returns the id of the sent reply, if any.
    pub async fn dispatch(&self, message: Message) -> Option<String> {
        let command = self.parser.parse(&message)?;
        tracing::info!("[{}] /{}", command.chat_id, command.kind.name());

        let reply = self.commands.handle(&command).await;

        // Group replies quote the invoking message
        let reply_to = command.is_group.then_some(command.message_id.as_str());

        let err = match self.bot.send_reply(&command.chat_id, &reply, reply_to).await {
            Ok(id) => {
                tracing::debug!("[{}] Sent reply {} ({} chars)", command.chat_id, id, reply.text().chars().count());
                return Some(id);
            }
            Err(e) => e,
        };
        tracing::error!("[{}] Failed to send reply: {}", command.chat_id, err);

        // Markdown replies already fell back to plain text in the adapter
        if reply.parse_mode().is_some() {
            return None;
        }
        let fallback = self
            .commands
            .failure_reply(command.kind)
            .filter(|fallback| fallback.text() != reply.text())?;

        match self.bot.send_reply(&command.chat_id, &fallback, reply_to).await {
            Ok(id) => {
                tracing::warn!("[{}] Sent generic failure reply {} instead", command.chat_id, id);
                Some(id)
            }
            Err(e) => {
                tracing::error!("[{}] Failed to send failure reply: {}", command.chat_id, e);
                None
            }
        }
    }
}
