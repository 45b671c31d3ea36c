//! Google Translate client (free `translate_a/single` endpoint)

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::application::errors::TranslateError;
use crate::domain::traits::Translator;

/// The free endpoint rejects texts of this many characters or more
pub const MAX_CHARS: usize = 5000;

/// Google Translate client for a fixed language pair
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
    source: String,
    target: String,
}

impl GoogleTranslator {
    pub fn with_base_url(
        base_url: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            source: source.into(),
            target: target.into(),
        }
    }

    fn translate_url(&self) -> String {
        format!("{}/translate_a/single", self.base_url)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn target(&self) -> &str {
        &self.target
    }

    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let len = text.chars().count();
        if len >= MAX_CHARS {
            return Err(TranslateError::InvalidLength { len, max: MAX_CHARS });
        }

        let text = text.trim();
        if text.is_empty() || self.source == self.target {
            return Ok(text.to_string());
        }

        let response = self.client
            .get(self.translate_url())
            .query(&[
                ("client", "gtx"),
                ("sl", self.source.as_str()),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| TranslateError::Network(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslateError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api(format!("status: {}, body: {}", status, body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        parse_translation(&body)
    }
}

/// The endpoint answers with nested arrays; the first element lists
/// `[translated, original, ...]` chunks, one per sentence.
fn parse_translation(body: &Value) -> Result<String, TranslateError> {
    let chunks = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Parse("missing translation chunks".to_string()))?;

    let translated: String = chunks
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslateError::EmptyResult);
    }
    Ok(translated)
}
