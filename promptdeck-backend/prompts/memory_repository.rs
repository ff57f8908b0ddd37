use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Prompt;
use super::repository::PromptRepository;

/// In-memory repository used by unit tests. Records which read path ran and
/// with which term, so tests can assert on the exact delegation.
pub struct InMemoryPromptRepository {
    prompts: RwLock<Vec<Prompt>>,
    find_calls: AtomicUsize,
    search_terms: Mutex<Vec<String>>,
    fail_reads: bool,
}

impl InMemoryPromptRepository {
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self {
            prompts: RwLock::new(prompts),
            find_calls: AtomicUsize::new(0),
            search_terms: Mutex::new(Vec::new()),
            fail_reads: false,
        }
    }

    /// A repository whose reads always fail, for error-envelope tests.
    pub fn failing() -> Self {
        Self {
            prompts: RwLock::new(Vec::new()),
            find_calls: AtomicUsize::new(0),
            search_terms: Mutex::new(Vec::new()),
            fail_reads: true,
        }
    }

    pub fn find_count(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn search_terms(&self) -> Vec<String> {
        self.search_terms.lock().unwrap().clone()
    }
}

#[async_trait]
impl PromptRepository for InMemoryPromptRepository {
    async fn find_many(&self) -> Result<Vec<Prompt>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            bail!("in-memory repository set to fail");
        }

        let mut prompts = self.prompts.read().await.clone();
        prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(prompts)
    }

    async fn search_many(&self, term: &str) -> Result<Vec<Prompt>> {
        self.search_terms.lock().unwrap().push(term.to_string());
        if self.fail_reads {
            bail!("in-memory repository set to fail");
        }

        let needle = term.trim().to_lowercase();
        let mut prompts: Vec<Prompt> = self
            .prompts
            .read()
            .await
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.title.to_lowercase().contains(&needle)
                    || p.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(prompts)
    }

    async fn get(&self, id: &str) -> Result<Option<Prompt>> {
        if self.fail_reads {
            bail!("in-memory repository set to fail");
        }
        Ok(self
            .prompts
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn save(&self, prompt: Prompt) -> Result<()> {
        if self.fail_reads {
            bail!("in-memory repository set to fail");
        }
        let mut prompts = self.prompts.write().await;
        if let Some(existing) = prompts.iter_mut().find(|p| p.id == prompt.id) {
            *existing = prompt;
        } else {
            prompts.push(prompt);
        }
        Ok(())
    }
}
