//! Persisted key names.

pub const PROMPTS: &str = "prompts";
pub const TEMPLATES: &str = "templates";
pub const GEMINI_API_KEY: &str = "gemini_api_key";
pub const USER_LANGUAGE: &str = "user_language";
pub const WINDOW_WIDTH: &str = "windowWidth";
pub const WINDOW_HEIGHT: &str = "windowHeight";
pub const NEW_PROMPT_DRAFT: &str = "new_prompt_draft";
