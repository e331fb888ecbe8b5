//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod prompt;
pub mod response;
pub mod settings;
pub mod template;
pub mod view;

pub use prompt::*;
pub use response::*;
pub use settings::*;
pub use template::*;
pub use view::*;
