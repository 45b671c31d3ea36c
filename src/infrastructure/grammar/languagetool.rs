//! LanguageTool HTTP API client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::application::errors::GrammarError;
use crate::domain::entities::GrammarIssue;
use crate::domain::traits::GrammarChecker;

/// LanguageTool client; the public server at `https://api.languagetool.org/v2` is rate-limited
pub struct LanguageToolClient {
    client: Client,
    base_url: String,
    language: String,
}

impl LanguageToolClient {
    pub fn with_base_url(base_url: impl Into<String>, language: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
        }
    }

    fn check_url(&self) -> String {
        format!("{}/check", self.base_url)
    }
}

#[derive(Deserialize, Debug)]
struct CheckResponse {
    matches: Vec<Match>,
}

#[derive(Deserialize, Debug)]
struct Match {
    #[serde(default)]
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<Replacement>,
    rule: Option<Rule>,
}

#[derive(Deserialize, Debug)]
struct Replacement {
    value: String,
}

#[derive(Deserialize, Debug)]
struct Rule {
    id: String,
}

#[async_trait]
impl GrammarChecker for LanguageToolClient {
    fn name(&self) -> &str {
        "languagetool"
    }

    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
        let response = self.client
            .post(self.check_url())
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .await
            .map_err(|e| GrammarError::Network(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(GrammarError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GrammarError::Api(format!("status: {}, body: {}", status, body)));
        }

        let data: CheckResponse = response
            .json()
            .await
            .map_err(|e| GrammarError::Parse(e.to_string()))?;

        Ok(data.matches.into_iter().map(|m| to_issue(text, m)).collect())
    }
}

/// LanguageTool reports offsets in UTF-16 code units
fn to_issue(text: &str, m: Match) -> GrammarIssue {
    let start = utf16_to_char_index(text, m.offset);
    let end = utf16_to_char_index(text, m.offset.saturating_add(m.length));
    GrammarIssue {
        offset: start,
        length: end.saturating_sub(start),
        message: m.message,
        replacements: m.replacements.into_iter().map(|r| r.value).collect(),
        rule_id: m.rule.map(|r| r.id),
    }
}

/// Character index at a UTF-16 offset. Offsets inside a surrogate pair round up,
/// offsets past the end clamp to the character count.
fn utf16_to_char_index(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (i, ch) in text.chars().enumerate() {
        if units >= utf16_offset {
            return i;
        }
        units += ch.len_utf16();
    }
    text.chars().count()
}
