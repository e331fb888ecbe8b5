//! LLM Types
//!
//! Request parts, provider output, configuration and errors shared by all
//! providers.

use serde::{Deserialize, Serialize};

use promptdeck_core::proxy::ProxyConfig;

/// Default Gemini model used for prompt assistance
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// One part of a single-turn request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text
    Text { text: String },
    /// Inline image, base64-encoded
    InlineImage { mime_type: String, data: String },
}

impl ContentPart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an inline image part from base64 data
    pub fn image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineImage {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// What the provider handed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutput {
    /// Generated text (untrimmed, possibly empty)
    Text(String),
    /// The provider withheld output; `reason` is its raw block signal
    Blocked { reason: String },
}

impl GenerationOutput {
    /// Human-readable block placeholder, e.g. `SAFETY` ->
    /// "Response was blocked due to safety."
    pub fn blocked_message(reason: &str) -> String {
        format!(
            "Response was blocked due to {}.",
            reason.to_lowercase().replace('_', " ")
        )
    }
}

/// Provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Override for the API base URL (tests, gateways)
    pub base_url: Option<String>,
    /// Optional outbound proxy
    pub proxy: Option<ProxyConfig>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            proxy: None,
        }
    }
}

/// Errors returned by providers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Authentication failed (missing or invalid API key)
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    RateLimited { message: String },
    /// Model not found or not available
    ModelNotFound { model: String },
    /// Invalid request (bad parameters)
    InvalidRequest { message: String },
    /// Server error from the provider
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error
    NetworkError { message: String },
    /// Response parsing error
    ParseError { message: String },
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            LlmError::RateLimited { message } => write!(f, "Rate limited: {}", message),
            LlmError::ModelNotFound { model } => write!(f, "Model not found: {}", model),
            LlmError::InvalidRequest { message } => write!(f, "Invalid request: {}", message),
            LlmError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            LlmError::NetworkError { message } => write!(f, "Network error: {}", message),
            LlmError::ParseError { message } => write!(f, "Parse error: {}", message),
            LlmError::Other { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for LlmError {}

/// Result type alias for provider calls
pub type LlmResult<T> = Result<T, LlmError>;
