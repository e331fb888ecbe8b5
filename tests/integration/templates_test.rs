//! Template Integration Tests
//!
//! Seeding on first load and re-localizing on language change.

use std::sync::Arc;

use promptdeck::models::template::{default_templates, Locale, TemplateInput};
use promptdeck::storage::SqliteStore;
use promptdeck_core::{KeyValueStore, MemoryStore};

use crate::support::{memory_session, session_over, RecordingProvider};

fn count_defaults(templates: &[promptdeck::models::template::Template]) -> usize {
    templates.iter().filter(|t| t.is_default).count()
}

#[tokio::test]
async fn test_defaults_seeded_once_across_loads() {
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::in_memory().unwrap());

    let first = session_over(store.clone(), RecordingProvider::text("")).await;
    assert_eq!(count_defaults(&first.templates().await), 4);

    let second = session_over(store, RecordingProvider::text("")).await;
    assert_eq!(second.templates().await, first.templates().await);
}

#[tokio::test]
async fn test_stored_language_picks_seed_locale() {
    let store = Arc::new(MemoryStore::with_entries([(
        "user_language".to_string(),
        serde_json::json!("fr"),
    )]));
    let session = session_over(store, RecordingProvider::text("")).await;

    assert_eq!(session.locale().await, Locale::Fr);
    assert_eq!(session.templates().await, default_templates(Locale::Fr));
}

#[tokio::test]
async fn test_change_locale_swaps_defaults_and_keeps_user_templates() {
    let (_, _, session) = memory_session().await;
    session.change_locale(Locale::En).await.unwrap();
    let mine = session
        .add_template(TemplateInput {
            title: "Mine".to_string(),
            text: "About {{topic}}".to_string(),
        })
        .await
        .unwrap();

    let templates = session.change_locale(Locale::Fr).await.unwrap();
    assert_eq!(templates.len(), 5);
    assert_eq!(templates[0], mine);
    assert_eq!(count_defaults(&templates), 4);
    assert!(templates.iter().any(|t| t.title == "Générateur de Persona"));
    assert_eq!(session.templates().await, templates);
    assert_eq!(session.locale().await, Locale::Fr);

    // Switching back and forth never duplicates
    session.change_locale(Locale::En).await.unwrap();
    let templates = session.change_locale(Locale::En).await.unwrap();
    assert_eq!(templates.len(), 5);
}

#[tokio::test]
async fn test_deleted_defaults_stay_deleted_until_sync() {
    let (_, _, session) = memory_session().await;
    for t in session.templates().await {
        session.delete_template(&t.id).await.unwrap();
    }
    session.load().await.unwrap();
    assert!(session.templates().await.is_empty());

    let locale = session.locale().await;
    let restored = session.change_locale(locale).await.unwrap();
    assert_eq!(restored, default_templates(locale));
}
