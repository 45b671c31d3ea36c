/// Result of classifying a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    English,
    Other,
    /// The detector could not classify the text (too short, no letters)
    Inconclusive,
}

/// Language detector - must be pure and side-effect free
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Detection;
}
