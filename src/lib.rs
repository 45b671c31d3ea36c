//! Telegram bot that fixes grammar and translates English messages on request.

pub mod application;
pub mod domain;
pub mod infrastructure;
