use async_trait::async_trait;
use crate::application::errors::TranslateError;

/// Translation backend, configured with a fixed source and target language
#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    fn source(&self) -> &str;

    fn target(&self) -> &str;

    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
}
