//! Translation workflow (`/tr`)

use std::sync::Arc;
use crate::application::errors::TranslateError;
use crate::application::services::LanguageFilter;
use crate::domain::entities::{QuotedText, ReplyPayload, TranslationResult};
use crate::domain::traits::{Detection, Translator};

pub const USAGE_HINT: &str = "Reply to an *English* text message with /tr.";
pub const NOT_ENGLISH: &str = "That doesn't look like English.";
pub const TRANSLATE_FAILED: &str = "Sorry, I couldn't translate this right now.";

pub struct TranslationService {
    translator: Arc<dyn Translator>,
    filter: LanguageFilter,
}

impl TranslationService {
    pub fn new(translator: Arc<dyn Translator>, filter: LanguageFilter) -> Self {
        Self { translator, filter }
    }

    pub fn target(&self) -> &str {
        self.translator.target()
    }

    pub async fn translate(&self, english: &str) -> Result<TranslationResult, TranslateError> {
        let translated = self.translator.translate(english).await?;
        if translated.trim().is_empty() {
            return Err(TranslateError::EmptyResult);
        }
        Ok(TranslationResult {
            source: english.to_string(),
            translated,
        })
    }

    /// Build the reply for a `/tr` command
    pub async fn reply_for(&self, quoted: &QuotedText) -> ReplyPayload {
        let Some(original) = quoted.content() else {
            tracing::debug!("/tr used without a quoted text message");
            return ReplyPayload::markdown(USAGE_HINT);
        };

        let english = self.filter.extract_english(original);

        // An inconclusive re-check does not block translation
        if self.filter.detect(&english) == Detection::Other {
            tracing::debug!("Filtered text is not English, skipping translation");
            return ReplyPayload::plain(NOT_ENGLISH);
        }

        match self.translate(&english).await {
            Ok(result) => ReplyPayload::plain(result.translated),
            Err(e) => {
                tracing::error!(
                    backend = self.translator.name(),
                    source = self.translator.source(),
                    target = self.translator.target(),
                    error = %e,
                    "Translation failed"
                );
                ReplyPayload::plain(TRANSLATE_FAILED)
            }
        }
    }
}
