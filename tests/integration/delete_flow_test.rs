//! Delete Flow Integration Tests
//!
//! Confirmation, undo window and finalization through the session. Time is
//! paused so the undo window elapses instantly.

use std::time::Duration;

use promptdeck::models::prompt::PromptInput;

use crate::support::{memory_session, WINDOW};

#[tokio::test(start_paused = true)]
async fn test_delete_then_undo_never_writes() {
    let (store, _, session) = memory_session().await;
    let kept = session
        .save_prompt(PromptInput::new("kept", "x", None))
        .await
        .unwrap();
    let target = session
        .save_prompt(PromptInput::new("target", "x", None))
        .await
        .unwrap();
    let writes = store.write_count();

    session.request_delete(&target.id).await.unwrap();
    assert_eq!(session.pending_delete().await, Some(target.clone()));
    session.confirm_delete().await.unwrap();
    assert_eq!(session.prompts().await, vec![kept.clone()]);

    tokio::time::sleep(Duration::from_millis(4999)).await;
    assert_eq!(session.undo_delete().await, Some(target.clone()));
    assert_eq!(session.prompts().await, vec![kept, target]);

    tokio::time::sleep(WINDOW * 2).await;
    assert_eq!(store.write_count(), writes);
}

#[tokio::test(start_paused = true)]
async fn test_delete_finalizes_after_window() {
    let (store, _, session) = memory_session().await;
    let target = session
        .save_prompt(PromptInput::new("target", "x", None))
        .await
        .unwrap();
    let writes = store.write_count();

    session.request_delete(&target.id).await.unwrap();
    session.confirm_delete().await.unwrap();
    assert_eq!(store.write_count(), writes);

    tokio::time::sleep(WINDOW + Duration::from_millis(1)).await;
    assert_eq!(store.write_count(), writes + 1);
    assert!(session.pending_undo().await.is_none());
    assert!(session.undo_delete().await.is_none());

    // A reload sees the removal
    session.load().await.unwrap();
    assert!(session.prompts().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_leaves_prompt_in_place() {
    let (_, _, session) = memory_session().await;
    let target = session
        .save_prompt(PromptInput::new("target", "x", None))
        .await
        .unwrap();

    session.request_delete(&target.id).await.unwrap();
    assert_eq!(session.cancel_delete().await, Some(target.clone()));
    assert!(session.confirm_delete().await.unwrap().is_none());
    assert_eq!(session.prompts().await, vec![target]);
}

#[tokio::test(start_paused = true)]
async fn test_confirm_closes_detail_view_of_deleted_prompt() {
    let (_, _, session) = memory_session().await;
    let target = session
        .save_prompt(PromptInput::new("target", "x", None))
        .await
        .unwrap();

    session.view_prompt(&target.id).await.unwrap();
    session.request_delete(&target.id).await.unwrap();
    session.confirm_delete().await.unwrap();
    assert!(session.view_state().await.viewing.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_flush_persists_immediately() {
    let (_, _, session) = memory_session().await;
    let target = session
        .save_prompt(PromptInput::new("target", "x", None))
        .await
        .unwrap();

    session.request_delete(&target.id).await.unwrap();
    session.confirm_delete().await.unwrap();
    assert_eq!(session.flush_delete().await.unwrap(), Some(target));

    session.load().await.unwrap();
    assert!(session.prompts().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_requesting_another_delete_finalizes_pending_one() {
    let (_, _, session) = memory_session().await;
    let first = session
        .save_prompt(PromptInput::new("first", "x", None))
        .await
        .unwrap();
    let second = session
        .save_prompt(PromptInput::new("second", "x", None))
        .await
        .unwrap();

    session.request_delete(&first.id).await.unwrap();
    session.confirm_delete().await.unwrap();

    session.request_delete(&second.id).await.unwrap();
    session.cancel_delete().await;
    assert!(session.undo_delete().await.is_none());
    assert_eq!(session.prompts().await, vec![second.clone()]);

    session.load().await.unwrap();
    assert_eq!(session.prompts().await, vec![second]);
}
