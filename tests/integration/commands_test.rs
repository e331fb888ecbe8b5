//! Command Handler Integration Tests
//!
//! Startup wiring through `AppState` and the response envelope returned by
//! the command handlers.

use std::sync::Arc;

use promptdeck::commands;
use promptdeck::models::prompt::PromptInput;
use promptdeck::models::settings::{PromptDraft, SettingsUpdate, WindowSize};
use promptdeck::models::template::Locale;
use promptdeck::models::view::SortOrder;
use promptdeck::storage::ConfigService;
use promptdeck::AppState;
use promptdeck_core::MemoryStore;

use crate::support::RecordingProvider;

async fn state_in(dir: &tempfile::TempDir) -> AppState {
    let config = ConfigService::open(dir.path().join("config.json")).unwrap();
    AppState::with_parts(
        config,
        Arc::new(MemoryStore::new()),
        RecordingProvider::text("rewritten"),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_from_config_uses_configured_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ConfigService::open(dir.path().join("config.json")).unwrap();
    let db = dir.path().join("store").join("prompts.db");
    config
        .update_config(SettingsUpdate {
            database_path: Some(db.clone()),
            ..Default::default()
        })
        .unwrap();

    let state = AppState::from_config(config).await.unwrap();
    assert_eq!(state.store_backend(), "sqlite");
    assert!(db.exists());

    let health = commands::get_health(&state).await.data.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(!health.api_key);
}

#[tokio::test]
async fn test_add_list_edit_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir).await;

    let added = commands::add_prompt(&state, PromptInput::new("Zeta", "z", Some("Work".to_string())))
        .await
        .data
        .unwrap();
    commands::add_prompt(&state, PromptInput::new("alpha", "a", None)).await;

    let listed = commands::list_prompts(&state, None, None, Some(SortOrder::TitleAsc))
        .await
        .data
        .unwrap();
    let titles: Vec<&str> = listed.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["alpha", "Zeta"]);

    let edited = commands::edit_prompt(&state, added.id.clone(), None, Some("z2".to_string()), None)
        .await
        .data
        .unwrap();
    assert_eq!(edited.title, "Zeta");
    assert_eq!(edited.text, "z2");
    assert_eq!(edited.category, "Work");

    let categories = commands::list_categories(&state).await.data.unwrap();
    assert_eq!(categories, vec!["All", "Uncategorized", "Work"]);
}

#[tokio::test]
async fn test_failures_are_reported_in_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir).await;

    let response = commands::add_prompt(&state, PromptInput::new("", "x", None)).await;
    assert!(!response.success);
    assert!(response.error.unwrap().contains("Title"));

    let response = commands::get_prompt(&state, "prompt_missing".to_string()).await;
    assert!(!response.success);

    let response = commands::generate(&state, "hi".to_string()).await;
    assert!(!response.success);
    assert!(response.error.unwrap().contains("API key"));
}

#[tokio::test(start_paused = true)]
async fn test_delete_undo_commands() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir).await;
    let p = commands::add_prompt(&state, PromptInput::new("t", "x", None))
        .await
        .data
        .unwrap();

    let deleted = commands::delete_prompt(&state, p.id.clone()).await.data.unwrap();
    assert_eq!(deleted, Some(p.clone()));
    assert!(commands::list_prompts(&state, None, None, None).await.data.unwrap().is_empty());

    let restored = commands::undo_delete(&state).await.data.unwrap();
    assert_eq!(restored, Some(p));
    assert_eq!(commands::list_prompts(&state, None, None, None).await.data.unwrap().len(), 1);
}

#[tokio::test]
async fn test_improve_prompt_and_key_status() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir).await;
    let p = commands::add_prompt(&state, PromptInput::new("t", "teh text", None))
        .await
        .data
        .unwrap();

    assert_eq!(commands::get_api_key_status(&state).await.data, Some(None));
    commands::set_api_key(&state, "AIzaSecret1234".to_string()).await;
    let masked = commands::get_api_key_status(&state).await.data.unwrap().unwrap();
    assert!(masked.ends_with("1234"));
    assert!(!masked.contains("Secret"));

    let improved = commands::improve_prompt(&state, p.id).await.data.unwrap();
    assert_eq!(improved, "rewritten");
}

#[tokio::test]
async fn test_locale_and_templates_commands() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir).await;

    let templates = commands::set_locale(&state, Locale::Fr).await.data.unwrap();
    assert_eq!(templates.len(), 4);
    assert_eq!(commands::get_locale(&state).await.data, Some(Locale::Fr));

    commands::remove_template(&state, "builtin-email-writer".to_string()).await;
    assert_eq!(commands::list_templates(&state).await.data.unwrap().len(), 3);

    let synced = commands::sync_templates(&state).await.data.unwrap();
    assert_eq!(synced.len(), 4);
}

#[tokio::test]
async fn test_settings_update_persists() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir).await;

    let updated = commands::update_settings(
        &state,
        SettingsUpdate {
            undo_window_ms: Some(8000),
            ..Default::default()
        },
    )
    .await
    .data
    .unwrap();
    assert_eq!(updated.undo_window_ms, 8000);

    let reloaded = ConfigService::open(dir.path().join("config.json")).unwrap();
    assert_eq!(reloaded.get_config().undo_window_ms, 8000);
    assert_eq!(commands::get_settings(&state).await.data.unwrap().undo_window_ms, 8000);
}

#[tokio::test]
async fn test_window_and_draft_commands() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir).await;

    assert_eq!(commands::get_window_size(&state).await.data, Some(None));
    let saved = commands::set_window_size(&state, WindowSize { width: 1200, height: 500 })
        .await
        .data
        .unwrap();
    assert_eq!(saved, WindowSize { width: 790, height: 500 });
    assert_eq!(commands::get_window_size(&state).await.data, Some(Some(saved)));

    let draft = PromptDraft {
        title: "half".to_string(),
        text: "written".to_string(),
        ..Default::default()
    };
    assert!(commands::save_draft(&state, draft.clone()).await.success);
    assert_eq!(commands::get_draft(&state).await.data, Some(Some(draft)));

    // Saving an empty draft drops it
    assert!(commands::save_draft(&state, PromptDraft::default()).await.success);
    assert_eq!(commands::get_draft(&state).await.data, Some(None));
}

#[tokio::test]
async fn test_transient_undo_window_reaches_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ConfigService::open(dir.path().join("config.json")).unwrap();
    config
        .apply_transient(SettingsUpdate {
            undo_window_ms: Some(1500),
            ..Default::default()
        })
        .unwrap();

    let state = AppState::with_parts(
        config,
        Arc::new(MemoryStore::new()),
        RecordingProvider::text(""),
    )
    .await
    .unwrap();
    assert_eq!(state.session().undo_window().as_millis(), 1500);
    assert_eq!(
        ConfigService::open(dir.path().join("config.json"))
            .unwrap()
            .get_config()
            .undo_window_ms,
        5000
    );
}
