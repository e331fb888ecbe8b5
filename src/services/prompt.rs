//! Prompt Service
//!
//! Persistence of the prompt collection on top of the key-value store.
//! Every mutation is a read-modify-write of the whole `prompts` list.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use promptdeck_core::{get_json, set_json, KeyValueStore};

use crate::models::prompt::{normalize_category, ImportOutcome, Prompt, PromptInput};
use crate::storage::keys;
use crate::utils::error::{AppError, AppResult};

/// Repository for the persisted prompt collection
#[derive(Clone)]
pub struct PromptRepository {
    store: Arc<dyn KeyValueStore>,
}

impl PromptRepository {
    /// Create a repository over an injected store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All persisted prompts in insertion order
    pub async fn list(&self) -> AppResult<Vec<Prompt>> {
        let prompts: Option<Vec<Prompt>> = get_json(self.store.as_ref(), keys::PROMPTS).await?;
        Ok(prompts.unwrap_or_default())
    }

    async fn save(&self, prompts: &[Prompt]) -> AppResult<()> {
        set_json(self.store.as_ref(), keys::PROMPTS, prompts).await?;
        debug!(count = prompts.len(), "persisted prompts");
        Ok(())
    }

    /// Append a new prompt with a fresh id and persist
    pub async fn add(&self, input: PromptInput) -> AppResult<Prompt> {
        let prompt = Prompt::from_input(input);
        let mut prompts = self.list().await?;
        prompts.push(prompt.clone());
        self.save(&prompts).await?;
        info!(id = %prompt.id, "added prompt");
        Ok(prompt)
    }

    /// Replace the prompt with the same id. Unknown ids are ignored.
    pub async fn update(&self, prompt: Prompt) -> AppResult<()> {
        let prompt = prompt.normalized();
        let mut prompts = self.list().await?;

        let id = prompt.id.clone();
        let Some(slot) = prompts.iter_mut().find(|p| p.id == id) else {
            debug!(id = %id, "update skipped, unknown id");
            return Ok(());
        };
        *slot = prompt;

        self.save(&prompts).await?;
        info!(id = %id, "updated prompt");
        Ok(())
    }

    /// Remove a prompt by id and persist
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let mut prompts = self.list().await?;
        prompts.retain(|p| p.id != id);
        self.save(&prompts).await?;
        info!(id = %id, "removed prompt");
        Ok(())
    }

    /// Merge imported records into the collection.
    ///
    /// Only objects with non-empty string `id`, `title` and `text` whose id is
    /// not already present are accepted. The union is written once.
    pub async fn import_merge(&self, candidates: Value) -> AppResult<ImportOutcome> {
        let Value::Array(candidates) = candidates else {
            return Err(AppError::invalid_format("Imported data must be a JSON array"));
        };

        let mut merged = self.list().await?;
        let mut seen: HashSet<String> = merged.iter().map(|p| p.id.clone()).collect();
        let mut imported_count = 0;

        for candidate in &candidates {
            let Some(prompt) = accept_candidate(candidate) else {
                continue;
            };
            if !seen.insert(prompt.id.clone()) {
                continue;
            }
            merged.push(prompt);
            imported_count += 1;
        }

        self.save(&merged).await?;
        info!(
            offered = candidates.len(),
            imported = imported_count,
            "merged imported prompts"
        );

        Ok(ImportOutcome {
            merged,
            imported_count,
        })
    }
}

fn non_empty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Validate one imported record
fn accept_candidate(value: &Value) -> Option<Prompt> {
    let id = non_empty_str(value, "id")?;
    let title = non_empty_str(value, "title")?;
    let text = non_empty_str(value, "text")?;
    let category = value.get("category").and_then(Value::as_str);

    Some(Prompt {
        id: id.to_string(),
        title: title.to_string(),
        text: text.to_string(),
        category: normalize_category(category),
    })
}
