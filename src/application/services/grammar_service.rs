//! Grammar correction workflow (`/g`)

use std::sync::Arc;
use crate::application::errors::GrammarError;
use crate::domain::entities::{CorrectionResult, GrammarIssue, QuotedText, ReplyPayload};
use crate::domain::traits::GrammarChecker;

pub const USAGE_HINT: &str = "Reply to a *text* message with /g.";
pub const NO_ISSUES: &str = "Looks good ✅ No grammar issues found.";
pub const CHECK_FAILED: &str = "Sorry, I couldn't check this right now.";

pub struct GrammarService {
    checker: Arc<dyn GrammarChecker>,
}

impl GrammarService {
    pub fn new(checker: Arc<dyn GrammarChecker>) -> Self {
        Self { checker }
    }

    /// Check `text` and apply every non-overlapping fix
    pub async fn correct(&self, text: &str) -> Result<CorrectionResult, GrammarError> {
        let issues = self.checker.check(text).await?;
        let corrected = apply_corrections(text, &issues);
        if corrected.trim().is_empty() && !text.trim().is_empty() {
            return Err(GrammarError::EmptyResult);
        }
        Ok(CorrectionResult {
            original: text.to_string(),
            corrected,
            issues,
        })
    }

    /// Build the reply for a `/g` command
    pub async fn reply_for(&self, quoted: &QuotedText) -> ReplyPayload {
        let Some(original) = quoted.content() else {
            tracing::debug!("/g used without a quoted text message");
            return ReplyPayload::markdown(USAGE_HINT);
        };

        match self.correct(original).await {
            Ok(result) if result.is_unchanged() => ReplyPayload::plain(NO_ISSUES),
            Ok(result) => {
                tracing::debug!("{} issue(s) reported by {}", result.issues.len(), self.checker.name());
                ReplyPayload::plain(result.corrected)
            }
            Err(e) => {
                tracing::error!(backend = self.checker.name(), error = %e, "Grammar check failed");
                ReplyPayload::plain(CHECK_FAILED)
            }
        }
    }
}

/// Apply the first replacement of each issue to `text`.
///
/// Issues are taken by ascending offset (ties keep backend order). An issue
/// that starts inside an already applied one, runs past the end of the text,
/// or has no replacement is skipped.
pub fn apply_corrections(text: &str, issues: &[GrammarIssue]) -> String {
    let chars: Vec<char> = text.chars().collect();

    let mut ordered: Vec<&GrammarIssue> = issues
        .iter()
        .filter(|issue| !issue.replacements.is_empty())
        .collect();
    ordered.sort_by_key(|issue| issue.offset);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for issue in ordered {
        if issue.offset < cursor || issue.end() > chars.len() {
            tracing::trace!(offset = issue.offset, length = issue.length, "Skipping overlapping issue");
            continue;
        }
        out.extend(&chars[cursor..issue.offset]);
        out.push_str(&issue.replacements[0]);
        cursor = issue.end();
    }
    out.extend(&chars[cursor..]);
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::domain::entities::MAX_MESSAGE_LEN;

    /// Flags each listed misspelling wherever it appears
    pub(crate) struct FakeChecker {
        pub fixes: Vec<(&'static str, &'static str)>,
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    impl FakeChecker {
        pub fn new(fixes: Vec<(&'static str, &'static str)>) -> Self {
            Self { fixes, fail: false, calls: AtomicUsize::new(0) }
        }

        pub fn failing() -> Self {
            Self { fixes: Vec::new(), fail: true, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl GrammarChecker for FakeChecker {
        fn name(&self) -> &str {
            "fake"
        }

        async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GrammarError::RateLimited);
            }
            let mut issues = Vec::new();
            for (wrong, right) in &self.fixes {
                for (byte_idx, _) in text.match_indices(wrong) {
                    let offset = text[..byte_idx].chars().count();
                    issues.push(GrammarIssue::new(offset, wrong.chars().count()).with_replacement(*right));
                }
            }
            Ok(issues)
        }
    }

    fn quoted(text: &str) -> QuotedText {
        QuotedText::Text(text.to_string())
    }

    #[test]
    fn test_apply_single_issue() {
        let issues = vec![GrammarIssue::new(0, 2).with_replacement("He")];
        assert_eq!(apply_corrections("he go home", &issues), "He go home");
    }

    #[test]
    fn test_apply_multiple_issues_out_of_order() {
        let issues = vec![
            GrammarIssue::new(3, 2).with_replacement("goes"),
            GrammarIssue::new(0, 2).with_replacement("He"),
        ];
        assert_eq!(apply_corrections("he go home", &issues), "He goes home");
    }

    #[test]
    fn test_overlapping_issue_is_skipped() {
        let issues = vec![
            GrammarIssue::new(0, 4).with_replacement("Hello"),
            GrammarIssue::new(3, 4).with_replacement("XXXX"),
        ];
        assert_eq!(apply_corrections("helo world", &issues), "Hello world");
    }

    #[test]
    fn test_issue_without_replacement_is_ignored() {
        let issues = vec![GrammarIssue::new(0, 4).with_message("Style")];
        assert_eq!(apply_corrections("text here", &issues), "text here");
    }

    #[test]
    fn test_issue_past_end_is_ignored() {
        let issues = vec![GrammarIssue::new(8, 10).with_replacement("x")];
        assert_eq!(apply_corrections("short", &issues), "short");
    }

    #[test]
    fn test_offsets_count_characters() {
        let issues = vec![GrammarIssue::new(7, 3).with_replacement("the")];
        assert_eq!(apply_corrections("café – teh end", &issues), "café – the end");
    }

    #[tokio::test]
    async fn test_no_issues_reply() {
        let service = GrammarService::new(Arc::new(FakeChecker::new(vec![])));
        let reply = service.reply_for(&quoted("This is fine.")).await;
        assert_eq!(reply.text(), NO_ISSUES);
    }

    #[tokio::test]
    async fn test_corrected_reply() {
        let service = GrammarService::new(Arc::new(FakeChecker::new(vec![("teh", "the")])));
        let reply = service.reply_for(&quoted("I saw teh cat.")).await;
        assert_eq!(reply.text(), "I saw the cat.");
        assert_eq!(reply.parse_mode(), None);
    }

    #[tokio::test]
    async fn test_corrected_reply_is_truncated() {
        let service = GrammarService::new(Arc::new(FakeChecker::new(vec![("teh", "the")])));
        let text = "teh ".repeat(MAX_MESSAGE_LEN);
        let reply = service.reply_for(&quoted(&text)).await;
        assert_eq!(reply.text().chars().count(), MAX_MESSAGE_LEN);
        assert!(reply.text().starts_with("the the"));
    }

    #[tokio::test]
    async fn test_rerun_on_corrected_output_finds_nothing() {
        let service = GrammarService::new(Arc::new(FakeChecker::new(vec![("teh", "the")])));
        let first = service.reply_for(&quoted("teh cat and teh dog")).await;
        let second = service.reply_for(&quoted(first.text())).await;
        assert_eq!(second.text(), NO_ISSUES);
    }

    #[tokio::test]
    async fn test_whitespace_only_change_counts_as_no_issue() {
        let service = GrammarService::new(Arc::new(FakeChecker::new(vec![(".", ". ")])));
        let reply = service.reply_for(&quoted("Done.")).await;
        assert_eq!(reply.text(), NO_ISSUES);
    }

    #[tokio::test]
    async fn test_correction_removing_all_text_is_a_failure() {
        let service = GrammarService::new(Arc::new(FakeChecker::new(vec![("uh", "")])));
        let reply = service.reply_for(&quoted("uh")).await;
        assert_eq!(reply.text(), CHECK_FAILED);
        assert!(matches!(service.correct("uh uh").await, Err(GrammarError::EmptyResult)));
    }

    #[tokio::test]
    async fn test_blank_quote_has_no_issues() {
        let service = GrammarService::new(Arc::new(FakeChecker::new(vec![])));
        let reply = service.reply_for(&quoted("   ")).await;
        assert_eq!(reply.text(), NO_ISSUES);
    }

    #[tokio::test]
    async fn test_missing_quote_gives_usage_hint_without_backend_call() {
        let checker = Arc::new(FakeChecker::new(vec![]));
        let service = GrammarService::new(checker.clone());
        let reply = service.reply_for(&QuotedText::Absent).await;
        assert_eq!(reply.text(), USAGE_HINT);
        assert!(reply.parse_mode().is_some());
        assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_failure_gives_generic_message() {
        let checker = Arc::new(FakeChecker::failing());
        let service = GrammarService::new(checker.clone());
        let reply = service.reply_for(&quoted("anything")).await;
        assert_eq!(reply.text(), CHECK_FAILED);
        assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
    }
}
