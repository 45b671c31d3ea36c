//! English sentence extraction

use std::sync::Arc;
use crate::domain::traits::{Detection, LanguageDetector};

/// Keeps the English sentences of a text
#[derive(Clone)]
pub struct LanguageFilter {
    detector: Arc<dyn LanguageDetector>,
}

impl LanguageFilter {
    pub fn new(detector: Arc<dyn LanguageDetector>) -> Self {
        Self { detector }
    }

    pub fn detect(&self, text: &str) -> Detection {
        self.detector.detect(text)
    }

    /// Join the segments detected as English with a single space.
    ///
    /// When no segment is English, the ASCII characters of `text` are
    /// returned instead, and if that leaves nothing, `text` itself.
    pub fn extract_english(&self, text: &str) -> String {
        let kept: Vec<&str> = split_segments(text.trim())
            .into_iter()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .filter(|segment| self.detector.detect(segment) == Detection::English)
            .collect();

        if !kept.is_empty() {
            return kept.join(" ");
        }

        let ascii: String = text.chars().filter(char::is_ascii).collect();
        match ascii.trim() {
            "" => text.to_string(),
            trimmed => trimmed.to_string(),
        }
    }
}

/// Split after `.`, `!` or `?` when followed by whitespace.
/// The punctuation stays with its segment, the whitespace is dropped.
pub fn split_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = i + c.len_utf8();
        let mut next_start = end;
        while let Some(&(j, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            next_start = j + w.len_utf8();
            chars.next();
        }
        if next_start > end {
            segments.push(&text[start..end]);
            start = next_start;
        }
    }

    segments.push(&text[start..]);
    segments
}
