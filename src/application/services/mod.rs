//! Application services - Business logic orchestration

pub mod command_service;
pub mod grammar_service;
pub mod language_filter;
pub mod translation_service;

pub use command_service::CommandService;
pub use grammar_service::GrammarService;
pub use language_filter::LanguageFilter;
pub use translation_service::TranslationService;
