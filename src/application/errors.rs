//! Application layer errors

use thiserror::Error;

/// Chat platform errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Telegram API error ({status}): {description}")]
    Api { status: u16, description: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Telegram answers 400 when it cannot parse message entities
    pub fn is_bad_request(&self) -> bool {
        matches!(self, BotError::Api { status: 400, .. })
    }
}

/// Grammar backend errors
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Corrections left no text")]
    EmptyResult,
}

/// Translation backend errors
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Text length {len} is outside the accepted range (max {max})")]
    InvalidLength { len: usize, max: usize },

    #[error("Backend returned an empty translation")]
    EmptyResult,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
