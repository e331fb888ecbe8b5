//! Health Check Commands
//!
//! Commands for checking the health status of backend services.

use crate::models::response::{CommandResponse, HealthResponse};
use crate::state::AppState;

/// Get the health status of the store, config and API key
pub async fn get_health(state: &AppState) -> CommandResponse<HealthResponse> {
    let mut health = HealthResponse::default();

    health.store = state.store_backend().to_string();
    health.config = state.is_config_healthy();
    health.api_key = matches!(state.session().settings().api_key().await, Ok(Some(_)));

    // An in-memory store loses everything on exit
    health.status = if health.store == "sqlite" && health.config {
        "healthy".to_string()
    } else {
        "degraded".to_string()
    };

    CommandResponse::ok(health)
}
