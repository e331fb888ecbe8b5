//! Commands
//!
//! Handlers behind every CLI subcommand. Each wraps a session operation in a
//! [`CommandResponse`](crate::models::response::CommandResponse).

pub mod assist;
pub mod health;
pub mod prompts;
pub mod settings;
pub mod templates;

pub use assist::*;
pub use health::*;
pub use prompts::*;
pub use settings::*;
pub use templates::*;
