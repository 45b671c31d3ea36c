//! Language detection backed by `whatlang`

use whatlang::Lang;
use crate::domain::traits::{Detection, LanguageDetector};

/// Trigram-based detector. Guesses whatlang itself marks as unreliable
/// (short or ambiguous text) are inconclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Detection {
        match whatlang::detect(text) {
            Some(info) if !info.is_reliable() => Detection::Inconclusive,
            Some(info) if info.lang() == Lang::Eng => Detection::English,
            Some(_) => Detection::Other,
            None => Detection::Inconclusive,
        }
    }
}
