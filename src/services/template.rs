//! Template Service
//!
//! Persistence of the template collection, including first-use seeding and
//! re-localization of the default set.

use std::sync::Arc;

use tracing::{debug, info};

use promptdeck_core::{get_json, set_json, KeyValueStore};

use crate::models::template::{default_templates, Locale, Template, TemplateInput};
use crate::storage::keys;
use crate::utils::error::AppResult;

/// Repository for the persisted template collection
#[derive(Clone)]
pub struct TemplateRepository {
    store: Arc<dyn KeyValueStore>,
}

impl TemplateRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> AppResult<Option<Vec<Template>>> {
        Ok(get_json(self.store.as_ref(), keys::TEMPLATES).await?)
    }

    async fn save(&self, templates: &[Template]) -> AppResult<()> {
        set_json(self.store.as_ref(), keys::TEMPLATES, templates).await?;
        debug!(count = templates.len(), "persisted templates");
        Ok(())
    }

    /// Persisted templates. Seeds the locale defaults when the key was never
    /// written; an explicitly empty list stays empty.
    pub async fn list(&self, locale: Locale) -> AppResult<Vec<Template>> {
        if let Some(templates) = self.load().await? {
            return Ok(templates);
        }

        let seeded = default_templates(locale);
        self.save(&seeded).await?;
        info!(locale = %locale, "seeded default templates");
        Ok(seeded)
    }

    /// Append a user template
    pub async fn add(&self, input: TemplateInput) -> AppResult<Template> {
        input.validate()?;
        let template = Template::from_input(input);

        let mut templates = self.load().await?.unwrap_or_default();
        templates.push(template.clone());
        self.save(&templates).await?;
        info!(id = %template.id, "added template");
        Ok(template)
    }

    /// Remove a template by id
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let mut templates = self.load().await?.unwrap_or_default();
        templates.retain(|t| t.id != id);
        self.save(&templates).await?;
        info!(id = %id, "removed template");
        Ok(())
    }

    /// Replace every default template with the set for `locale`.
    /// User templates keep their order and content.
    pub async fn sync_defaults(&self, locale: Locale) -> AppResult<Vec<Template>> {
        let mut templates: Vec<Template> = self
            .load()
            .await?
            .unwrap_or_default()
            .into_iter()
            .filter(|t| !t.is_default)
            .collect();
        templates.extend(default_templates(locale));

        self.save(&templates).await?;
        info!(locale = %locale, total = templates.len(), "synced default templates");
        Ok(templates)
    }
}
