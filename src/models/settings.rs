//! Settings Models
//!
//! Application configuration (config.json) and the small user-state records
//! kept in the key-value store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use promptdeck_core::ProxyConfig;
use promptdeck_llm::DEFAULT_MODEL;

/// Default undo window after a confirmed delete
pub const DEFAULT_UNDO_WINDOW_MS: u64 = 5000;

/// Largest window the popup may be restored to
pub const MAX_WINDOW_WIDTH: u32 = 790;
pub const MAX_WINDOW_HEIGHT: u32 = 600;

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for the Gemini API base URL
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// How long a deleted prompt can be restored, in milliseconds
    #[serde(default = "default_undo_window_ms")]
    pub undo_window_ms: u64,
    /// Override for the SQLite database location
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Outbound proxy for AI requests
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_undo_window_ms() -> u64 {
    DEFAULT_UNDO_WINDOW_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: None,
            undo_window_ms: DEFAULT_UNDO_WINDOW_MS,
            database_path: None,
            proxy: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub undo_window_ms: Option<u64>,
    pub database_path: Option<PathBuf>,
    pub proxy: Option<ProxyConfig>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(url) = update.api_base_url {
            self.api_base_url = if url.trim().is_empty() { None } else { Some(url) };
        }
        if let Some(window) = update.undo_window_ms {
            self.undo_window_ms = window;
        }
        if let Some(path) = update.database_path {
            self.database_path = Some(path);
        }
        if let Some(proxy) = update.proxy {
            self.proxy = Some(proxy);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        if self.undo_window_ms < 500 {
            return Err("undo_window_ms must be at least 500".to_string());
        }

        if let Some(proxy) = &self.proxy {
            proxy.validate()?;
        }

        Ok(())
    }
}

/// Last known window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    /// Clamp to the largest restorable size
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.min(MAX_WINDOW_WIDTH),
            height: self.height.min(MAX_WINDOW_HEIGHT),
        }
    }
}

/// Image pasted into the new-prompt form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftImage {
    /// Base64 payload
    pub data: String,
    pub mime_type: String,
}

/// The single in-progress new-prompt draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<DraftImage>,
}

impl PromptDraft {
    /// Nothing worth keeping
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self.category.trim().is_empty()
            && self.text.trim().is_empty()
            && self.image.is_none()
    }
}
