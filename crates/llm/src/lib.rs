//! Promptdeck LLM
//!
//! Provides the interface the prompt assistant uses to talk to a generative
//! model, plus the Gemini implementation and the HTTP client factory.

pub mod gemini;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use provider::LlmProvider;
pub use types::*;
