//! Style-aware summary generation on top of an `LlmProvider`

use crate::llm::client::{GenerationRequest, LlmProvider};
use crate::llm::prompts::{build_style_prompt, SummaryStyle, SYSTEM_INSTRUCTION};
use crate::{Error, Result};

pub struct SummaryGenerator {
    provider: Box<dyn LlmProvider>,
}

impl SummaryGenerator {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Render the prompt for `style` and return the model's text as-is.
    pub async fn generate(&self, processed_text: &str, style: SummaryStyle) -> Result<String> {
        let prompt = build_style_prompt(style, processed_text);

        tracing::info!(style = style.as_str(), "Generating summary");
        self.provider
            .generate(GenerationRequest {
                system_instruction: SYSTEM_INSTRUCTION,
                prompt: &prompt,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %format!("{e:#}"), "LLM provider error");
                Error::GenerationFailed
            })
    }
}
