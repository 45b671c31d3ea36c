use super::QuotedText;

/// Commands the bot answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Start,
    Grammar,
    Translate,
}

impl CommandKind {
    pub const ALL: [CommandKind; 3] = [CommandKind::Start, CommandKind::Grammar, CommandKind::Translate];

    /// Command name as typed after the slash
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Grammar => "g",
            CommandKind::Translate => "tr",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandKind::Start => "Show usage",
            CommandKind::Grammar => "Reply to a message to fix its grammar",
            CommandKind::Translate => "Reply to an English message to translate it",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// A parsed command invocation, consumed once by the dispatcher
#[derive(Debug, Clone)]
pub struct IncomingCommand {
    pub kind: CommandKind,
    pub chat_id: String,
    pub message_id: String,
    pub is_group: bool,
    pub quoted: QuotedText,
}
