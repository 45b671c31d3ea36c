use async_trait::async_trait;
use crate::application::errors::GrammarError;
use crate::domain::entities::GrammarIssue;

/// Grammar backend
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Backend name, for logs
    fn name(&self) -> &str;

    /// Report the issues found in `text`
    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, GrammarError>;
}
