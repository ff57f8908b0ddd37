use anyhow::Result;
use async_trait::async_trait;

use super::Prompt;

/// Persistence seam for prompts. Handlers and the search use case only ever
/// see this trait; the concrete store is constructed in `main` and injected
/// through the application state.
#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// All prompts, newest first.
    async fn find_many(&self) -> Result<Vec<Prompt>>;

    /// Prompts whose title or content contains `term`, case-insensitive,
    /// newest first. A blank term applies no filter.
    async fn search_many(&self, term: &str) -> Result<Vec<Prompt>>;

    async fn get(&self, id: &str) -> Result<Option<Prompt>>;

    async fn save(&self, prompt: Prompt) -> Result<()>;
}
