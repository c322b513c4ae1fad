//! LLM module for ringkas
//!
//! Handles prompt templating and summary generation using the Gemini API.

mod client;
mod gemini;
mod prompts;
mod summarizer;

pub use client::{build_provider, GenerationRequest, LlmProvider};
pub use gemini::GeminiClient;
pub use prompts::{build_style_prompt, SummaryStyle, SYSTEM_INSTRUCTION};
pub use summarizer::SummaryGenerator;
