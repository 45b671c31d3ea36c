/// Text a command operates on, taken from the message it replies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotedText {
    Text(String),
    Caption(String),
    Absent,
}

impl QuotedText {
    /// Prefer the message text, fall back to the caption. Empty values count as missing.
    pub fn from_parts(text: Option<&str>, caption: Option<&str>) -> Self {
        match (text, caption) {
            (Some(t), _) if !t.is_empty() => QuotedText::Text(t.to_string()),
            (_, Some(c)) if !c.is_empty() => QuotedText::Caption(c.to_string()),
            _ => QuotedText::Absent,
        }
    }

    /// Quoted content, trimmed. `None` when there is nothing to work on.
    pub fn content(&self) -> Option<&str> {
        match self {
            QuotedText::Text(s) | QuotedText::Caption(s) => Some(s.trim()),
            QuotedText::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, QuotedText::Absent)
    }
}

/// Platform-neutral incoming message
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub is_group: bool,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub reply_to: Option<Box<Message>>,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chat_id: chat_id.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_reply_to(mut self, message: Message) -> Self {
        self.reply_to = Some(Box::new(message));
        self
    }

    pub fn in_group(mut self) -> Self {
        self.is_group = true;
        self
    }

    /// Text or caption of the message this one replies to
    pub fn quoted(&self) -> QuotedText {
        match &self.reply_to {
            Some(m) => QuotedText::from_parts(m.text.as_deref(), m.caption.as_deref()),
            None => QuotedText::Absent,
        }
    }
}
