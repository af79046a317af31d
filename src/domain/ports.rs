use crate::domain::model::Prompt;
use crate::utils::error::Result;
use async_trait::async_trait;

/// The external text-completion service, reduced to the one call this
/// crate makes. Implementations own envelope extraction; `complete`
/// returns the bare text payload.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn api_base(&self) -> &str;
    fn model(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
    fn max_input_chars(&self) -> usize;
}
