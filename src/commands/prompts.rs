//! Prompt Commands
//!
//! Command handlers for the prompt collection.

use std::path::PathBuf;

use crate::models::prompt::{Prompt, PromptInput};
use crate::models::response::CommandResponse;
use crate::models::view::SortOrder;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// List prompts as displayed, with optional search, category and sort
pub async fn list_prompts(
    state: &AppState,
    query: Option<String>,
    category: Option<String>,
    sort: Option<SortOrder>,
) -> CommandResponse<Vec<Prompt>> {
    let session = state.session();
    if let Some(query) = query {
        session.set_query(query).await;
    }
    if let Some(category) = category {
        session.select_category(category).await;
    }
    if let Some(sort) = sort {
        session.set_sort_order(sort).await;
    }

    CommandResponse::ok(session.visible_prompts().await)
}

/// Category selector contents
pub async fn list_categories(state: &AppState) -> CommandResponse<Vec<String>> {
    CommandResponse::ok(state.session().categories().await)
}

/// Show one prompt
pub async fn get_prompt(state: &AppState, id: String) -> CommandResponse<Prompt> {
    state.session().view_prompt(&id).await.into()
}

/// Add a new prompt
pub async fn add_prompt(state: &AppState, input: PromptInput) -> CommandResponse<Prompt> {
    let session = state.session();
    session.open_add_form().await;
    let result = session.save_prompt(input).await;
    if result.is_err() {
        session.close_form().await;
    }
    result.into()
}

/// Edit an existing prompt. Fields left as `None` keep their current value.
pub async fn edit_prompt(
    state: &AppState,
    id: String,
    title: Option<String>,
    text: Option<String>,
    category: Option<String>,
) -> CommandResponse<Prompt> {
    let session = state.session();
    let result: AppResult<Prompt> = async move {
        let existing = session.open_edit_form(&id).await?;
        let input = PromptInput {
            title: title.unwrap_or(existing.title),
            text: text.unwrap_or(existing.text),
            category: Some(category.unwrap_or(existing.category)),
        };
        session.save_prompt(input).await
    }
    .await;

    if result.is_err() {
        session.close_form().await;
    }
    result.into()
}

/// Request and confirm a delete. The prompt stays restorable until the undo
/// window ends or the delete is flushed.
pub async fn delete_prompt(state: &AppState, id: String) -> CommandResponse<Option<Prompt>> {
    let session = state.session();
    let result: AppResult<Option<Prompt>> = async {
        session.request_delete(&id).await?;
        session.confirm_delete().await
    }
    .await;
    result.into()
}

/// Restore the prompt inside its undo window
pub async fn undo_delete(state: &AppState) -> CommandResponse<Option<Prompt>> {
    CommandResponse::ok(state.session().undo_delete().await)
}

/// Persist a pending delete now
pub async fn flush_delete(state: &AppState) -> CommandResponse<Option<Prompt>> {
    state.session().flush_delete().await.into()
}

/// Write all prompts to a JSON file; returns how many were written
pub async fn export_prompts(state: &AppState, path: PathBuf) -> CommandResponse<usize> {
    state.session().export_prompts(&path).await.into()
}

/// Merge a JSON export file; returns how many prompts were added
pub async fn import_prompts(state: &AppState, path: PathBuf) -> CommandResponse<usize> {
    state.session().import_prompts(&path).await.into()
}
