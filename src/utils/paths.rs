//! Cross-Platform Path Utilities
//!
//! Functions for resolving the application directory (~/.promptdeck/).

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the promptdeck directory (~/.promptdeck/)
pub fn promptdeck_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".promptdeck"))
}

/// Get the config file path (~/.promptdeck/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(promptdeck_dir()?.join("config.json"))
}

/// Get the default database file path (~/.promptdeck/data.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(promptdeck_dir()?.join("data.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
