use std::sync::Arc;

use anyhow::Result;

use super::Prompt;
use super::repository::PromptRepository;

/// The list-all vs. filtered-search decision. This is the only place that
/// chooses between the two repository read paths.
pub struct SearchPrompts {
    repo: Arc<dyn PromptRepository>,
}

impl SearchPrompts {
    pub fn new(repo: Arc<dyn PromptRepository>) -> Self {
        Self { repo }
    }

    /// Trims the term once; a missing or blank term lists everything,
    /// anything else goes through the filtered search with the trimmed term.
    /// Repository failures propagate unchanged.
    pub async fn execute(&self, term: Option<&str>) -> Result<Vec<Prompt>> {
        let term = term.unwrap_or("").trim();
        if term.is_empty() {
            self.repo.find_many().await
        } else {
            self.repo.search_many(term).await
        }
    }
}
