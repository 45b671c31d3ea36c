//! Message parser - Turns incoming messages into commands

use once_cell::sync::Lazy;
use regex_lite::Regex;
use crate::domain::entities::{CommandKind, IncomingCommand, Message};

/// `/name` or `/name@botname` at the very start of the text
static COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/([A-Za-z0-9_]{1,32})(?:@([A-Za-z0-9_]+))?(?:\s|$)").expect("command pattern is valid")
});

/// Parses incoming messages into commands addressed to this bot
pub struct MessageParser {
    bot_username: String,
}

impl MessageParser {
    pub fn new(bot_username: impl Into<String>) -> Self {
        Self {
            bot_username: bot_username.into(),
        }
    }

    /// `None` for plain text, unknown commands and commands meant for another bot
    pub fn parse(&self, message: &Message) -> Option<IncomingCommand> {
        let text = message.text.as_deref()?;
        let caps = COMMAND.captures(text)?;

        if let Some(target) = caps.get(2) {
            if !target.as_str().eq_ignore_ascii_case(&self.bot_username) {
                tracing::trace!("Ignoring command for @{}", target.as_str());
                return None;
            }
        }

        let kind = CommandKind::from_name(caps.get(1)?.as_str())?;

        Some(IncomingCommand {
            kind,
            chat_id: message.chat_id.clone(),
            message_id: message.id.clone(),
            is_group: message.is_group,
            quoted: message.quoted(),
        })
    }
}
