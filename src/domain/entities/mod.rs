//! Domain entities - Core business objects with no external dependencies

pub mod message;
pub mod command;
pub mod reply;
pub mod results;

pub use message::{Message, QuotedText};
pub use command::{CommandKind, IncomingCommand};
pub use reply::{ParseMode, ReplyPayload, MAX_MESSAGE_LEN};
pub use results::{CorrectionResult, GrammarIssue, TranslationResult};
