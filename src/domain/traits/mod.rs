//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod detector;
pub mod grammar;
pub mod translator;

pub use bot::{Bot, BotInfo};
pub use detector::{Detection, LanguageDetector};
pub use grammar::GrammarChecker;
pub use translator::Translator;
