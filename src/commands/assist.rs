//! Assistant Commands
//!
//! Command handlers for AI generation and prompt rewriting.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::models::response::CommandResponse;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

/// Generate text from a prompt
pub async fn generate(state: &AppState, prompt: String) -> CommandResponse<String> {
    state.session().generate(&prompt).await.into()
}

/// Generate text from a prompt and an image file
pub async fn generate_with_image(
    state: &AppState,
    prompt: String,
    image: PathBuf,
    mime_type: Option<String>,
) -> CommandResponse<String> {
    let result: AppResult<String> = async move {
        let bytes = std::fs::read(&image)?;
        let mime_type = match mime_type {
            Some(mime) => mime,
            None => guess_mime_type(&image)?,
        };
        state
            .session()
            .generate_from_image(&prompt, &STANDARD.encode(bytes), &mime_type)
            .await
    }
    .await;
    result.into()
}

fn guess_mime_type(path: &std::path::Path) -> AppResult<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        _ => {
            return Err(AppError::validation(format!(
                "Cannot tell the image type of {}; pass --mime",
                path.display()
            )))
        }
    };
    Ok(mime.to_string())
}

/// Improve the text of prompt `id`
pub async fn improve_prompt(state: &AppState, id: String) -> CommandResponse<String> {
    let session = state.session();
    let result: AppResult<String> = async {
        let prompt = session.view_prompt(&id).await?;
        session.improve(&prompt.text).await
    }
    .await;
    result.into()
}

/// Re-engineer the text of prompt `id`
pub async fn engineer_prompt(state: &AppState, id: String) -> CommandResponse<String> {
    let session = state.session();
    let result: AppResult<String> = async {
        let prompt = session.view_prompt(&id).await?;
        session.engineer(&prompt.text).await
    }
    .await;
    result.into()
}
