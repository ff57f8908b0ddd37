pub mod repository;
pub mod search;
pub mod sqlite_repository;

#[cfg(test)]
pub mod memory_repository;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored prompt — the primary domain entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reduced view of a [`Prompt`] for list rendering. Timestamps stay
/// server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSummary {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl Prompt {
    pub fn summary(&self) -> PromptSummary {
        PromptSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_roundtrip() {
        let prompt = Prompt {
            id: "test-id".to_string(),
            title: "Daily standup".to_string(),
            content: "Summarize yesterday's commits".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&prompt).unwrap();
        let parsed: Prompt = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, "test-id");
        assert_eq!(parsed.title, "Daily standup");
        assert_eq!(parsed.created_at, prompt.created_at);
    }

    #[test]
    fn test_summary_drops_timestamps() {
        let prompt = Prompt {
            id: "1".to_string(),
            title: "Title 01".to_string(),
            content: "Content 01".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let summary = prompt.summary();
        assert_eq!(summary.id, "1");
        assert_eq!(summary.title, "Title 01");
        assert_eq!(summary.content, "Content 01");

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("created_at").is_none());
        assert!(json.get("updated_at").is_none());
    }
}
