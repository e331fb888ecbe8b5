//! Prompt export and import files.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::models::prompt::Prompt;
use crate::utils::error::{AppError, AppResult};

/// Pretty-printed JSON array of the prompts
pub fn export_json(prompts: &[Prompt]) -> AppResult<String> {
    if prompts.is_empty() {
        return Err(AppError::validation("No prompts to export"));
    }
    Ok(serde_json::to_string_pretty(prompts)?)
}

/// Parse an import file's contents. The shape is checked by the repository.
pub fn parse_import(text: &str) -> AppResult<Value> {
    serde_json::from_str(text)
        .map_err(|e| AppError::invalid_format(format!("Import file is not valid JSON: {}", e)))
}

/// Write the export file
pub fn export_to_file(path: &Path, prompts: &[Prompt]) -> AppResult<()> {
    let json = export_json(prompts)?;
    fs::write(path, json)?;
    info!(path = %path.display(), count = prompts.len(), "exported prompts");
    Ok(())
}

/// Read and parse an import file
pub fn read_import_file(path: &Path) -> AppResult<Value> {
    let text = fs::read_to_string(path)?;
    parse_import(&text)
}
