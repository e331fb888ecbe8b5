//! promptdeck - Prompt Library Backend
//!
//! This library provides everything behind the `promptdeck` binary:
//! - Command handlers wrapping session operations
//! - The session controller and its services (repositories, delete flow,
//!   view engine, AI assistant)
//! - Storage layer (SQLite key-value store, JSON config)
//! - Data models and utilities

pub mod cli;
pub mod commands;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export models (avoiding settings module conflict)
pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use session::Session;
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
