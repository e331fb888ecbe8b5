//! Prompt Models
//!
//! Data structures for the prompt collection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

/// Category assigned when the user leaves the field blank
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A user-authored prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub text: String,
    pub category: String,
}

/// Form payload for adding or editing a prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptInput {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Result of merging an imported file into the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// Existing prompts followed by the accepted imports
    pub merged: Vec<Prompt>,
    /// How many imported entries were accepted
    pub imported_count: usize,
}

impl Prompt {
    /// Build a new prompt from form input with a fresh id
    pub fn from_input(input: PromptInput) -> Self {
        Self {
            id: new_prompt_id(),
            title: input.title,
            text: input.text,
            category: normalize_category(input.category.as_deref()),
        }
    }

    /// Apply form input to an existing prompt, keeping its id
    pub fn with_input(&self, input: PromptInput) -> Self {
        Self {
            id: self.id.clone(),
            title: input.title,
            text: input.text,
            category: normalize_category(input.category.as_deref()),
        }
    }

    /// Re-apply category normalization in place
    pub fn normalized(mut self) -> Self {
        self.category = normalize_category(Some(&self.category));
        self
    }
}

impl PromptInput {
    /// Create an input with a category
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            category,
        }
    }

    /// Reject blank required fields before anything reaches a repository
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        if self.text.trim().is_empty() {
            return Err(AppError::validation("Prompt text is required"));
        }
        Ok(())
    }
}

/// Trim a category; blank collapses to `Uncategorized`
pub fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

/// Fresh prompt id. UUIDv7 is fixed-width and time-ordered, so comparing ids
/// as strings orders prompts by creation.
pub fn new_prompt_id() -> String {
    format!("prompt_{}", Uuid::now_v7().simple())
}
