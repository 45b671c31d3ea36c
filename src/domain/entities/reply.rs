/// Telegram's limit for a single outgoing message, in characters
pub const MAX_MESSAGE_LEN: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Markdown => "Markdown",
        }
    }
}

/// Outgoing reply text, never longer than [`MAX_MESSAGE_LEN`] characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPayload {
    text: String,
    parse_mode: Option<ParseMode>,
}

impl ReplyPayload {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: truncate_chars(text.into(), MAX_MESSAGE_LEN),
            parse_mode: None,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: truncate_chars(text.into(), MAX_MESSAGE_LEN),
            parse_mode: Some(ParseMode::Markdown),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parse_mode(&self) -> Option<ParseMode> {
        self.parse_mode
    }
}

/// Keep the first `max` characters of `text`
pub fn truncate_chars(mut text: String, max: usize) -> String {
    let cut = text.char_indices().nth(max).map(|(idx, _)| idx);
    if let Some(idx) = cut {
        text.truncate(idx);
    }
    text
}
