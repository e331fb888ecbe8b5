//! Session Integration Tests
//!
//! Adding, editing, searching and sorting prompts through the session.

use std::sync::Arc;

use promptdeck::models::prompt::PromptInput;
use promptdeck::models::settings::PromptDraft;
use promptdeck::models::view::{FormState, Screen, SortOrder};
use promptdeck::storage::SqliteStore;
use promptdeck::AppError;
use promptdeck_core::KeyValueStore;

use crate::support::{memory_session, session_over, RecordingProvider};

// ============================================================================
// Add / edit
// ============================================================================

#[tokio::test]
async fn test_add_prompt_with_blank_category() {
    let (store, _, session) = memory_session().await;
    let writes = store.write_count();

    session.open_add_form().await;
    let added = session
        .save_prompt(PromptInput::new("T1", "X", Some(String::new())))
        .await
        .unwrap();

    assert_eq!(added.category, "Uncategorized");
    let visible = session.visible_prompts().await;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "T1");
    assert!(store.write_count() > writes);
    assert_eq!(session.view_state().await.form, FormState::Closed);
}

#[tokio::test]
async fn test_blank_fields_rejected_without_mutation() {
    let (store, _, session) = memory_session().await;
    let writes = store.write_count();

    session.open_add_form().await;
    let err = session
        .save_prompt(PromptInput::new("", "text", None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(session.prompts().await.is_empty());
    assert_eq!(store.write_count(), writes);
    // The form stays open so the user can fix it
    assert_eq!(session.view_state().await.form, FormState::Adding);
}

#[tokio::test]
async fn test_successful_add_clears_draft() {
    let (_, _, session) = memory_session().await;
    session
        .settings()
        .save_draft(&PromptDraft {
            title: "half".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    session.open_add_form().await;
    session
        .save_prompt(PromptInput::new("done", "text", None))
        .await
        .unwrap();

    assert!(session.settings().draft().await.unwrap().is_none());
}

#[tokio::test]
async fn test_edit_keeps_id_and_position() {
    let (_, _, session) = memory_session().await;
    let first = session
        .save_prompt(PromptInput::new("first", "a", Some("Work".to_string())))
        .await
        .unwrap();
    session
        .save_prompt(PromptInput::new("second", "b", None))
        .await
        .unwrap();

    let form_prompt = session.open_edit_form(&first.id).await.unwrap();
    assert_eq!(form_prompt, first);
    let edited = session
        .save_prompt(PromptInput::new("first, edited", "a2", Some(" Home ".to_string())))
        .await
        .unwrap();

    assert_eq!(edited.id, first.id);
    assert_eq!(edited.category, "Home");
    let prompts = session.prompts().await;
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], edited);
}

#[tokio::test]
async fn test_edit_refreshes_open_detail_view() {
    let (_, _, session) = memory_session().await;
    let p = session
        .save_prompt(PromptInput::new("t", "x", None))
        .await
        .unwrap();

    session.view_prompt(&p.id).await.unwrap();
    session.open_edit_form(&p.id).await.unwrap();
    session
        .save_prompt(PromptInput::new("t2", "x", None))
        .await
        .unwrap();

    let viewing = session.view_state().await.viewing.unwrap();
    assert_eq!(viewing.title, "t2");
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let (_, _, session) = memory_session().await;
    assert!(matches!(
        session.view_prompt("prompt_nope").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        session.open_edit_form("prompt_nope").await,
        Err(AppError::NotFound(_))
    ));
}

// ============================================================================
// Search / sort
// ============================================================================

#[tokio::test]
async fn test_default_sort_is_newest_first() {
    let (_, _, session) = memory_session().await;
    for title in ["one", "two", "three"] {
        session
            .save_prompt(PromptInput::new(title, "x", None))
            .await
            .unwrap();
    }

    let titles: Vec<String> = session
        .visible_prompts()
        .await
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["three", "two", "one"]);
}

#[tokio::test]
async fn test_title_sort_with_query_and_category() {
    let (_, _, session) = memory_session().await;
    for (title, category) in [
        ("beta mail", "Work"),
        ("Alpha mail", "Work"),
        ("alpha mail", "Home"),
        ("gamma", "Work"),
    ] {
        session
            .save_prompt(PromptInput::new(title, "x", Some(category.to_string())))
            .await
            .unwrap();
    }

    session.set_sort_order(SortOrder::TitleAsc).await;
    session.set_query("MAIL").await;
    let titles: Vec<String> = session
        .visible_prompts()
        .await
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Alpha mail", "alpha mail", "beta mail"]);

    session.select_category("Work").await;
    let titles: Vec<String> = session
        .visible_prompts()
        .await
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Alpha mail", "beta mail"]);

    session.select_category("Nope").await;
    assert!(session.visible_prompts().await.is_empty());

    session.select_category("All").await;
    session.set_query("").await;
    assert_eq!(session.visible_prompts().await.len(), 4);

    assert_eq!(session.categories().await, vec!["All", "Home", "Work"]);
}

#[tokio::test]
async fn test_screen_switching() {
    let (_, _, session) = memory_session().await;
    session.open_settings().await;
    assert_eq!(session.view_state().await.screen, Screen::Settings);
    session.close_settings().await;
    assert_eq!(session.view_state().await.screen, Screen::Main);
}

// ============================================================================
// Persistence across sessions
// ============================================================================

#[tokio::test]
async fn test_prompts_survive_restart_on_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");

    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&path).unwrap());
    let session = session_over(store, RecordingProvider::text("")).await;
    let added = session
        .save_prompt(PromptInput::new("kept", "text", Some("Notes".to_string())))
        .await
        .unwrap();
    drop(session);

    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&path).unwrap());
    let reopened = session_over(store, RecordingProvider::text("")).await;
    assert_eq!(reopened.prompts().await, vec![added]);
}
