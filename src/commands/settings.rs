//! Settings Commands
//!
//! Command handlers for the API key, language, saved window size, the
//! new-prompt draft and application configuration.

use crate::models::response::CommandResponse;
use crate::models::settings::{AppConfig, PromptDraft, SettingsUpdate, WindowSize};
use crate::models::template::{Locale, Template};
use crate::state::AppState;

/// Save the Gemini API key. An empty key clears it.
pub async fn set_api_key(state: &AppState, key: String) -> CommandResponse<()> {
    state.session().settings().set_api_key(&key).await.into()
}

pub async fn clear_api_key(state: &AppState) -> CommandResponse<()> {
    state.session().settings().set_api_key("").await.into()
}

/// Whether a key is stored, and a masked preview of it
pub async fn get_api_key_status(state: &AppState) -> CommandResponse<Option<String>> {
    state
        .session()
        .settings()
        .api_key()
        .await
        .map(|key| key.map(|k| mask_key(&k)))
        .into()
}

/// Keep the last four characters visible
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

pub async fn get_locale(state: &AppState) -> CommandResponse<Locale> {
    CommandResponse::ok(state.session().locale().await)
}

/// Switch language and re-localize the default templates
pub async fn set_locale(state: &AppState, locale: Locale) -> CommandResponse<Vec<Template>> {
    state.session().change_locale(locale).await.into()
}

pub async fn get_settings(state: &AppState) -> CommandResponse<AppConfig> {
    CommandResponse::ok(state.get_config().await)
}

pub async fn update_settings(state: &AppState, update: SettingsUpdate) -> CommandResponse<AppConfig> {
    state.update_config(update).await.into()
}

pub async fn get_window_size(state: &AppState) -> CommandResponse<Option<WindowSize>> {
    state.session().settings().window_size().await.into()
}

/// Save the window size; the stored value is clamped
pub async fn set_window_size(state: &AppState, size: WindowSize) -> CommandResponse<WindowSize> {
    state.session().settings().set_window_size(size).await.into()
}

pub async fn get_draft(state: &AppState) -> CommandResponse<Option<PromptDraft>> {
    state.session().settings().draft().await.into()
}

/// Save the new-prompt draft. An empty draft clears it.
pub async fn save_draft(state: &AppState, draft: PromptDraft) -> CommandResponse<()> {
    state.session().settings().save_draft(&draft).await.into()
}

pub async fn clear_draft(state: &AppState) -> CommandResponse<()> {
    state.session().settings().clear_draft().await.into()
}
