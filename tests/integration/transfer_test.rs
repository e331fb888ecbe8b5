//! Export / Import Integration Tests

use std::fs;

use promptdeck::models::prompt::PromptInput;
use promptdeck::AppError;

use crate::support::memory_session;

#[tokio::test]
async fn test_export_then_reimport_is_idempotent() {
    let (_, _, session) = memory_session().await;
    session
        .save_prompt(PromptInput::new("a", "x", Some("Work".to_string())))
        .await
        .unwrap();
    session
        .save_prompt(PromptInput::new("b", "y", None))
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("prompts.json");
    assert_eq!(session.export_prompts(&file).await.unwrap(), 2);

    let before = session.prompts().await;
    assert_eq!(session.import_prompts(&file).await.unwrap(), 0);
    assert_eq!(session.prompts().await, before);
}

#[tokio::test]
async fn test_import_into_fresh_session() {
    let (_, _, session) = memory_session().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("prompts.json");
    fs::write(
        &file,
        r#"[
            {"id": "prompt_1", "title": "Kept", "text": "x", "category": ""},
            {"id": "prompt_2", "title": "", "text": "missing title"},
            {"id": "prompt_1", "title": "Duplicate", "text": "x"}
        ]"#,
    )
    .unwrap();

    assert_eq!(session.import_prompts(&file).await.unwrap(), 1);
    let prompts = session.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].title, "Kept");
    assert_eq!(prompts[0].category, "Uncategorized");
}

#[tokio::test]
async fn test_non_array_import_rejected() {
    let (store, _, session) = memory_session().await;
    let writes = store.write_count();
    let dir = tempfile::tempdir().unwrap();

    let object = dir.path().join("object.json");
    fs::write(&object, r#"{"id": "prompt_1", "title": "t", "text": "x"}"#).unwrap();
    assert!(matches!(
        session.import_prompts(&object).await,
        Err(AppError::InvalidFormat(_))
    ));

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, "not json at all").unwrap();
    assert!(matches!(
        session.import_prompts(&garbage).await,
        Err(AppError::InvalidFormat(_))
    ));

    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn test_empty_export_rejected() {
    let (_, _, session) = memory_session().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("empty.json");

    assert!(matches!(
        session.export_prompts(&file).await,
        Err(AppError::Validation(_))
    ));
    assert!(!file.exists());
}

#[tokio::test(start_paused = true)]
async fn test_import_keeps_prompt_in_undo_window_hidden() {
    let (_, _, session) = memory_session().await;
    let target = session
        .save_prompt(PromptInput::new("target", "x", None))
        .await
        .unwrap();

    session.request_delete(&target.id).await.unwrap();
    session.confirm_delete().await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("other.json");
    fs::write(&file, r#"[{"id": "prompt_z", "title": "z", "text": "x"}]"#).unwrap();
    session.import_prompts(&file).await.unwrap();

    let titles: Vec<String> = session.prompts().await.into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["z"]);

    // Undo still brings it back
    session.undo_delete().await.unwrap();
    assert_eq!(session.prompts().await.len(), 2);
}
