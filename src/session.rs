//! Session Controller
//!
//! Owns the in-memory prompt and template lists and the view state for one
//! running session, and routes every user action to the repositories, the
//! delete flow and the assistant. State is only changed after the operation
//! it depends on succeeded.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};

use promptdeck_core::KeyValueStore;
use promptdeck_llm::LlmProvider;

use crate::models::prompt::{Prompt, PromptInput};
use crate::models::template::{Locale, Template, TemplateInput};
use crate::models::view::{FormState, Screen, SortOrder, ViewState};
use crate::services::view;
use crate::services::{
    transfer, DeleteFlow, PromptAssistant, PromptRepository, SettingsService, SharedPrompts,
    TemplateRepository,
};
use crate::utils::error::{AppError, AppResult};

/// One running session
#[derive(Clone)]
pub struct Session {
    prompts: SharedPrompts,
    templates: Arc<RwLock<Vec<Template>>>,
    locale: Arc<RwLock<Locale>>,
    view: Arc<RwLock<ViewState>>,
    prompt_repo: PromptRepository,
    template_repo: TemplateRepository,
    settings: SettingsService,
    assistant: PromptAssistant,
    deletes: DeleteFlow,
}

impl Session {
    /// Wire a session over an injected store and provider. Call [`Session::load`]
    /// before use.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        provider: Arc<dyn LlmProvider>,
        undo_window: Duration,
    ) -> Self {
        let prompts: SharedPrompts = Arc::new(RwLock::new(Vec::new()));
        let prompt_repo = PromptRepository::new(store.clone());
        let settings = SettingsService::new(store.clone());

        Self {
            deletes: DeleteFlow::new(prompt_repo.clone(), prompts.clone(), undo_window),
            assistant: PromptAssistant::new(provider, settings.clone()),
            template_repo: TemplateRepository::new(store),
            prompts,
            templates: Arc::new(RwLock::new(Vec::new())),
            locale: Arc::new(RwLock::new(Locale::default())),
            view: Arc::new(RwLock::new(ViewState::default())),
            prompt_repo,
            settings,
        }
    }

    /// Read prompts, the active locale and templates (seeding defaults)
    pub async fn load(&self) -> AppResult<()> {
        let prompts = self.prompt_repo.list().await?;
        let locale = self.settings.locale().await?;
        let templates = self.template_repo.list(locale).await?;

        info!(
            prompts = prompts.len(),
            templates = templates.len(),
            locale = %locale,
            "session loaded"
        );
        *self.prompts.write().await = prompts;
        *self.templates.write().await = templates;
        *self.locale.write().await = locale;
        Ok(())
    }

    /// Settings accessors (API key, window size, draft)
    pub fn settings(&self) -> &SettingsService {
        &self.settings
    }

    // ========================================================================
    // View state
    // ========================================================================

    pub async fn view_state(&self) -> ViewState {
        self.view.read().await.clone()
    }

    /// Every prompt currently in memory, in insertion order
    pub async fn prompts(&self) -> Vec<Prompt> {
        self.prompts.read().await.clone()
    }

    /// The prompt list as displayed: sorted, then filtered
    pub async fn visible_prompts(&self) -> Vec<Prompt> {
        let state = self.view.read().await;
        let prompts = self.prompts.read().await;
        view::view(&prompts, &state.query, &state.category, state.sort_order)
    }

    pub async fn categories(&self) -> Vec<String> {
        view::categories(&self.prompts.read().await)
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.view.write().await.query = query.into();
    }

    pub async fn select_category(&self, category: impl Into<String>) {
        self.view.write().await.category = category.into();
    }

    pub async fn set_sort_order(&self, order: SortOrder) {
        self.view.write().await.sort_order = order;
    }

    pub async fn open_settings(&self) {
        self.view.write().await.screen = Screen::Settings;
    }

    pub async fn close_settings(&self) {
        self.view.write().await.screen = Screen::Main;
    }

    pub async fn open_add_form(&self) {
        self.view.write().await.form = FormState::Adding;
    }

    /// Open the edit form pre-filled with the prompt `id`
    pub async fn open_edit_form(&self, id: &str) -> AppResult<Prompt> {
        let prompt = self.find(id).await?;
        self.view.write().await.form = FormState::Editing(prompt.clone());
        Ok(prompt)
    }

    pub async fn close_form(&self) {
        self.view.write().await.form = FormState::Closed;
    }

    /// Open the detail view for prompt `id`
    pub async fn view_prompt(&self, id: &str) -> AppResult<Prompt> {
        let prompt = self.find(id).await?;
        self.view.write().await.viewing = Some(prompt.clone());
        Ok(prompt)
    }

    pub async fn close_view(&self) {
        self.view.write().await.viewing = None;
    }

    async fn find(&self, id: &str) -> AppResult<Prompt> {
        self.prompts
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Prompt {}", id)))
    }

    // ========================================================================
    // Prompt mutations
    // ========================================================================

    /// Save the form: update when editing, add otherwise
    pub async fn save_prompt(&self, input: PromptInput) -> AppResult<Prompt> {
        input.validate()?;
        let form = self.view.read().await.form.clone();

        let saved = match form {
            FormState::Editing(existing) => {
                let updated = existing.with_input(input);
                self.prompt_repo.update(updated.clone()).await?;

                let mut prompts = self.prompts.write().await;
                if let Some(slot) = prompts.iter_mut().find(|p| p.id == updated.id) {
                    *slot = updated.clone();
                }
                updated
            }
            FormState::Adding | FormState::Closed => {
                let added = self.prompt_repo.add(input).await?;
                self.prompts.write().await.push(added.clone());
                self.settings.clear_draft().await?;
                added
            }
        };

        let mut state = self.view.write().await;
        state.form = FormState::Closed;
        if state.viewing.as_ref().is_some_and(|p| p.id == saved.id) {
            state.viewing = Some(saved.clone());
        }
        Ok(saved)
    }

    /// Ask to delete prompt `id`
    pub async fn request_delete(&self, id: &str) -> AppResult<Prompt> {
        let prompt = self.find(id).await?;
        self.deletes.initiate(prompt.clone()).await?;
        Ok(prompt)
    }

    pub async fn cancel_delete(&self) -> Option<Prompt> {
        self.deletes.cancel().await
    }

    /// Confirm the requested delete and start the undo window
    pub async fn confirm_delete(&self) -> AppResult<Option<Prompt>> {
        let deleted = self.deletes.confirm().await?;
        if let Some(prompt) = &deleted {
            let mut state = self.view.write().await;
            if state.viewing.as_ref().is_some_and(|p| p.id == prompt.id) {
                state.viewing = None;
            }
        }
        Ok(deleted)
    }

    pub async fn undo_delete(&self) -> Option<Prompt> {
        self.deletes.undo().await
    }

    /// Persist a pending delete without waiting for the undo window
    pub async fn flush_delete(&self) -> AppResult<Option<Prompt>> {
        self.deletes.finalize().await
    }

    pub async fn pending_delete(&self) -> Option<Prompt> {
        self.deletes.pending_confirm().await
    }

    pub async fn pending_undo(&self) -> Option<Prompt> {
        self.deletes.pending_undo().await
    }

    pub fn undo_window(&self) -> Duration {
        self.deletes.window()
    }

    // ========================================================================
    // Templates
    // ========================================================================

    pub async fn templates(&self) -> Vec<Template> {
        self.templates.read().await.clone()
    }

    pub async fn locale(&self) -> Locale {
        *self.locale.read().await
    }

    pub async fn add_template(&self, input: TemplateInput) -> AppResult<Template> {
        let template = self.template_repo.add(input).await?;
        self.templates.write().await.push(template.clone());
        Ok(template)
    }

    pub async fn delete_template(&self, id: &str) -> AppResult<()> {
        self.template_repo.remove(id).await?;
        self.templates.write().await.retain(|t| t.id != id);
        Ok(())
    }

    /// Persist the new language and re-localize the default templates
    pub async fn change_locale(&self, locale: Locale) -> AppResult<Vec<Template>> {
        self.settings.set_locale(locale).await?;
        *self.locale.write().await = locale;

        let templates = self.template_repo.sync_defaults(locale).await?;
        *self.templates.write().await = templates.clone();
        Ok(templates)
    }

    // ========================================================================
    // Export / import
    // ========================================================================

    pub async fn export_prompts(&self, path: &Path) -> AppResult<usize> {
        let prompts = self.prompts().await;
        transfer::export_to_file(path, &prompts)?;
        Ok(prompts.len())
    }

    /// Merge an export file into the collection; returns how many were added
    pub async fn import_prompts(&self, path: &Path) -> AppResult<usize> {
        let candidates = transfer::read_import_file(path)?;
        let outcome = self.prompt_repo.import_merge(candidates).await?;

        // A prompt inside its undo window is still in the store but stays hidden
        let hidden = self.deletes.pending_undo().await.map(|p| p.id);
        let mut merged = outcome.merged;
        if let Some(hidden) = hidden {
            merged.retain(|p| p.id != hidden);
        }
        *self.prompts.write().await = merged;

        debug!(imported = outcome.imported_count, "import applied to session");
        Ok(outcome.imported_count)
    }

    // ========================================================================
    // Assistant
    // ========================================================================

    pub async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.assistant.generate_text(prompt).await
    }

    pub async fn generate_from_image(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> AppResult<String> {
        self.assistant
            .generate_from_image(prompt, image_base64, mime_type)
            .await
    }

    pub async fn improve(&self, text: &str) -> AppResult<String> {
        self.assistant.improve(text).await
    }

    pub async fn engineer(&self, text: &str) -> AppResult<String> {
        self.assistant.engineer(text).await
    }
}
