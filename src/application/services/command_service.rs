use crate::domain::entities::{CommandKind, IncomingCommand, ReplyPayload};
use super::grammar_service::CHECK_FAILED;
use super::translation_service::TRANSLATE_FAILED;
use super::{GrammarService, TranslationService};

/// Service for executing commands
pub struct CommandService {
    grammar: GrammarService,
    translation: TranslationService,
    start_text: String,
}

impl CommandService {
    /// `target_name` is the human-readable translation target shown in `/start`
    pub fn new(grammar: GrammarService, translation: TranslationService, target_name: &str) -> Self {
        Self {
            grammar,
            translation,
            start_text: start_text(target_name),
        }
    }

    pub async fn handle(&self, command: &IncomingCommand) -> ReplyPayload {
        match command.kind {
            CommandKind::Start => ReplyPayload::plain(self.start_text.clone()),
            CommandKind::Grammar => self.grammar.reply_for(&command.quoted).await,
            CommandKind::Translate => self.translation.reply_for(&command.quoted).await,
        }
    }

    /// Generic failure message of a workflow. `/start` has none.
    pub fn failure_reply(&self, kind: CommandKind) -> Option<ReplyPayload> {
        match kind {
            CommandKind::Start => None,
            CommandKind::Grammar => Some(ReplyPayload::plain(CHECK_FAILED)),
            CommandKind::Translate => Some(ReplyPayload::plain(TRANSLATE_FAILED)),
        }
    }

    pub fn translation_target(&self) -> &str {
        self.translation.target()
    }
}

fn start_text(target_name: &str) -> String {
    format!(
        "Hi! Add me to a group and use:\n/g (reply) → grammar fix\n/tr (reply) → English → {}",
        target_name
    )
}
