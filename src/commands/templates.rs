//! Template Commands

use crate::models::response::CommandResponse;
use crate::models::template::{Template, TemplateInput};
use crate::state::AppState;

pub async fn list_templates(state: &AppState) -> CommandResponse<Vec<Template>> {
    CommandResponse::ok(state.session().templates().await)
}

pub async fn add_template(state: &AppState, input: TemplateInput) -> CommandResponse<Template> {
    state.session().add_template(input).await.into()
}

pub async fn remove_template(state: &AppState, id: String) -> CommandResponse<()> {
    state.session().delete_template(&id).await.into()
}

/// Re-apply the default set for the active language
pub async fn sync_templates(state: &AppState) -> CommandResponse<Vec<Template>> {
    let session = state.session();
    let locale = session.locale().await;
    session.change_locale(locale).await.into()
}
