//! Services
//!
//! Business logic services for the application.
//! Services handle the core functionality and are called by the session.

pub mod assist;
pub mod prompt;
pub mod settings;
pub mod template;
pub mod transfer;
pub mod undo;
pub mod view;

pub use assist::PromptAssistant;
pub use prompt::PromptRepository;
pub use settings::SettingsService;
pub use template::TemplateRepository;
pub use undo::{DeleteFlow, SharedPrompts};
