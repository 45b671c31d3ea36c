//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Message, IncomingCommand, ReplyPayload)
//! - Traits: Abstractions for infrastructure (Bot, GrammarChecker, Translator, LanguageDetector)

pub mod entities;
pub mod traits;
