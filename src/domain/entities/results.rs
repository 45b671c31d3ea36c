/// A single problem reported by a grammar backend.
///
/// `offset` and `length` count characters (Unicode scalar values) of the
/// checked text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarIssue {
    pub offset: usize,
    pub length: usize,
    pub message: String,
    pub replacements: Vec<String>,
    pub rule_id: Option<String>,
}

impl GrammarIssue {
    pub fn new(offset: usize, length: usize) -> Self {
        Self {
            offset,
            length,
            message: String::new(),
            replacements: Vec::new(),
            rule_id: None,
        }
    }

    pub fn with_replacement(mut self, value: impl Into<String>) -> Self {
        self.replacements.push(value.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }
}

/// Outcome of a grammar check
#[derive(Debug, Clone)]
pub struct CorrectionResult {
    pub original: String,
    pub corrected: String,
    pub issues: Vec<GrammarIssue>,
}

impl CorrectionResult {
    pub fn is_unchanged(&self) -> bool {
        self.corrected.trim() == self.original.trim()
    }
}

/// Outcome of a translation
#[derive(Debug, Clone)]
pub struct TranslationResult {
    pub source: String,
    pub translated: String,
}
