//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform integrations (Telegram)
//! - Grammar, Translation: HTTP backends
//! - Language: Language detection

pub mod adapters;
pub mod config;
pub mod grammar;
pub mod language;
pub mod translation;
