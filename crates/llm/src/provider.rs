//! LLM Provider Trait
//!
//! Defines the common interface for generative providers.

use async_trait::async_trait;

use super::types::{ContentPart, GenerationOutput, LlmError, LlmResult};

/// Trait that all generative providers must implement.
///
/// A call is a single turn: one user message made of `parts`, one answer.
/// The API key is supplied per call because it lives in user storage and can
/// change between calls.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Returns whether this provider accepts image parts.
    fn supports_multimodal(&self) -> bool {
        false
    }

    /// Issue one generation request.
    async fn generate_content(
        &self,
        api_key: &str,
        parts: Vec<ContentPart>,
    ) -> LlmResult<GenerationOutput>;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
