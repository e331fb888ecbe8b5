//! Settings Service
//!
//! User state kept in the key-value store: the Gemini API key, the UI
//! language, the last window size and the new-prompt draft.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use promptdeck_core::{get_json, set_json, KeyValueStore};

use crate::models::settings::{PromptDraft, WindowSize};
use crate::models::template::Locale;
use crate::storage::keys;
use crate::utils::error::AppResult;

/// Read the system language from the usual environment variables
pub fn system_locale_tag() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

/// Stored choice first, then the system language, then English
pub fn resolve_locale(stored: Option<&str>, system: Option<&str>) -> Locale {
    stored
        .or(system)
        .map(Locale::from_tag)
        .unwrap_or_default()
}

/// Accessors for the small persisted settings
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored API key, if a non-empty one exists
    pub async fn api_key(&self) -> AppResult<Option<String>> {
        let key: Option<String> = get_json(self.store.as_ref(), keys::GEMINI_API_KEY).await?;
        Ok(key.filter(|k| !k.trim().is_empty()))
    }

    /// Store the API key. An empty key clears it.
    pub async fn set_api_key(&self, key: &str) -> AppResult<()> {
        let key = key.trim();
        if key.is_empty() {
            self.store.remove(keys::GEMINI_API_KEY).await?;
            info!("api key cleared");
        } else {
            set_json(self.store.as_ref(), keys::GEMINI_API_KEY, key).await?;
            info!("api key saved");
        }
        Ok(())
    }

    /// Active language: the saved choice, else the system locale, else `en`
    pub async fn locale(&self) -> AppResult<Locale> {
        let stored: Option<String> = get_json(self.store.as_ref(), keys::USER_LANGUAGE).await?;
        let system = system_locale_tag();
        let locale = resolve_locale(stored.as_deref(), system.as_deref());
        debug!(stored = ?stored, system = ?system, locale = %locale, "resolved locale");
        Ok(locale)
    }

    pub async fn set_locale(&self, locale: Locale) -> AppResult<()> {
        set_json(self.store.as_ref(), keys::USER_LANGUAGE, locale.code()).await?;
        info!(locale = %locale, "language saved");
        Ok(())
    }

    /// Last saved window size, clamped; `None` until one was saved
    pub async fn window_size(&self) -> AppResult<Option<WindowSize>> {
        let width: Option<u32> = get_json(self.store.as_ref(), keys::WINDOW_WIDTH).await?;
        let height: Option<u32> = get_json(self.store.as_ref(), keys::WINDOW_HEIGHT).await?;
        Ok(match (width, height) {
            (Some(width), Some(height)) => Some(WindowSize { width, height }.clamped()),
            _ => None,
        })
    }

    /// Save the window size, clamped, as one write
    pub async fn set_window_size(&self, size: WindowSize) -> AppResult<WindowSize> {
        let size = size.clamped();
        self.store
            .set(vec![
                (keys::WINDOW_WIDTH.to_string(), json!(size.width)),
                (keys::WINDOW_HEIGHT.to_string(), json!(size.height)),
            ])
            .await?;
        Ok(size)
    }

    pub async fn draft(&self) -> AppResult<Option<PromptDraft>> {
        Ok(get_json(self.store.as_ref(), keys::NEW_PROMPT_DRAFT).await?)
    }

    /// Save the draft. An empty draft clears it.
    pub async fn save_draft(&self, draft: &PromptDraft) -> AppResult<()> {
        if draft.is_empty() {
            return self.clear_draft().await;
        }
        set_json(self.store.as_ref(), keys::NEW_PROMPT_DRAFT, draft).await?;
        Ok(())
    }

    pub async fn clear_draft(&self) -> AppResult<()> {
        self.store.remove(keys::NEW_PROMPT_DRAFT).await?;
        Ok(())
    }
}
