//! Prompt Assistant
//!
//! Text and image+text generation through the configured provider, using the
//! API key from user storage. One request per call, no retries.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info, warn};

use promptdeck_llm::{ContentPart, GenerationOutput, LlmProvider};

use super::settings::SettingsService;
use crate::utils::error::{AppError, AppResult};

/// Instruction wrapped around text by [`PromptAssistant::improve`]
fn improve_instruction(text: &str) -> String {
    format!(
        "Correct any spelling or grammar mistakes and improve the phrasing of the following text. \
         Make it clearer, more concise, and more effective. Return only the improved text, \
         without any additional explanations or introductory phrases.\n\nOriginal text:\n\"{}\"",
        text
    )
}

/// Instruction wrapped around text by [`PromptAssistant::engineer`]
fn engineer_instruction(text: &str) -> String {
    format!(
        "Analyze the following prompt and re-engineer it to be more effective for a large language model. \
         Apply prompt engineering principles such as:\n\
         1. Adding a clear role or persona for the AI (e.g., \"You are an expert copywriter...\").\n\
         2. Specifying the desired output format (e.g., list, JSON, paragraph).\n\
         3. Providing context, constraints, and clear, direct instructions.\n\
         4. Structuring the prompt for clarity.\n\n\
         Return ONLY the re-engineered prompt, without any explanations or introductory phrases.\n\n\
         Original Prompt:\n\"{}\"",
        text
    )
}

/// Façade over the generative provider
#[derive(Clone)]
pub struct PromptAssistant {
    provider: Arc<dyn LlmProvider>,
    settings: SettingsService,
}

impl PromptAssistant {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: SettingsService) -> Self {
        Self { provider, settings }
    }

    /// Generate text from a prompt
    pub async fn generate_text(&self, prompt: &str) -> AppResult<String> {
        self.generate(vec![ContentPart::text(prompt)]).await
    }

    /// Generate text from a prompt and a base64-encoded image
    pub async fn generate_from_image(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> AppResult<String> {
        if mime_type.trim().is_empty() {
            return Err(AppError::validation("Image MIME type is required"));
        }
        STANDARD
            .decode(image_base64)
            .map_err(|e| AppError::validation(format!("Image data is not valid base64: {}", e)))?;

        self.generate(vec![
            ContentPart::text(prompt),
            ContentPart::image(mime_type, image_base64),
        ])
        .await
    }

    /// Fix spelling and grammar and tighten the phrasing of `text`
    pub async fn improve(&self, text: &str) -> AppResult<String> {
        self.generate_text(&improve_instruction(text)).await
    }

    /// Rewrite `text` as a better-structured prompt
    pub async fn engineer(&self, text: &str) -> AppResult<String> {
        self.generate_text(&engineer_instruction(text)).await
    }

    async fn generate(&self, parts: Vec<ContentPart>) -> AppResult<String> {
        let api_key = self.settings.api_key().await?.ok_or(AppError::MissingApiKey)?;

        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            parts = parts.len(),
            "sending generation request"
        );
        let output = self.provider.generate_content(&api_key, parts).await?;

        match output {
            GenerationOutput::Text(text) => {
                info!(chars = text.len(), "generation succeeded");
                Ok(text.trim().to_string())
            }
            GenerationOutput::Blocked { reason } => {
                warn!(reason = %reason, "generation blocked");
                Ok(GenerationOutput::blocked_message(&reason))
            }
        }
    }
}
