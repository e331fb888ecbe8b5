//! Gemini Provider
//!
//! Implementation of the LlmProvider trait for Google's Generative Language
//! API (`models/{model}:generateContent`). Supports text and inline images.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    ContentPart, GenerationOutput, LlmError, LlmResult, ProviderConfig,
};
use crate::http_client::build_http_client;

/// Default Gemini API base
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Finish reasons that mean the candidate was withheld rather than empty
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(config.proxy.as_ref())?;
        Ok(Self { config, client })
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(GEMINI_API_URL)
            .trim_end_matches('/')
    }

    /// Full endpoint for the configured model
    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url(), self.config.model)
    }

    /// Build the request body for the API
    fn build_request_body(&self, parts: &[ContentPart]) -> serde_json::Value {
        let parts: Vec<serde_json::Value> = parts
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => serde_json::json!({ "text": text }),
                ContentPart::InlineImage { mime_type, data } => serde_json::json!({
                    "inlineData": {
                        "mimeType": mime_type,
                        "data": data,
                    }
                }),
            })
            .collect();

        serde_json::json!({
            "contents": [{ "parts": parts }]
        })
    }
}

/// Turn a decoded response into text or a block signal.
fn interpret_response(response: GenerateContentResponse) -> GenerationOutput {
    let candidate = response.candidates.into_iter().next();

    let text: String = candidate
        .as_ref()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter(|p| !p.thought.unwrap_or(false))
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return GenerationOutput::Blocked { reason };
        }
        if let Some(reason) = candidate.and_then(|c| c.finish_reason) {
            if BLOCKING_FINISH_REASONS.contains(&reason.as_str()) {
                return GenerationOutput::Blocked { reason };
            }
        }
    }

    GenerationOutput::Text(text)
}

/// Pull `error.message` out of an error body, falling back to the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn supports_multimodal(&self) -> bool {
        true
    }

    async fn generate_content(
        &self,
        api_key: &str,
        parts: Vec<ContentPart>,
    ) -> LlmResult<GenerationOutput> {
        if api_key.trim().is_empty() {
            return Err(missing_api_key_error(self.name()));
        }
        if parts.is_empty() {
            return Err(LlmError::InvalidRequest {
                message: "request must contain at least one part".to_string(),
            });
        }

        let body = self.build_request_body(&parts);
        tracing::debug!(model = %self.config.model, parts = parts.len(), "gemini generateContent");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.without_url().to_string(),
            })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status, &error_message(&body), "gemini"));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| LlmError::ParseError {
                message: e.without_url().to_string(),
            })?;

        Ok(interpret_response(parsed))
    }
}

/// Gemini API response format
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
