use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;

/// Single text-generation request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest<'a> {
    pub system_instruction: &'a str,
    pub prompt: &'a str,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings, http: Client) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings, http)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ),
    }
}
