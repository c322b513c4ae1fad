//! ringkas - Summarize text, articles, and YouTube videos with an LLM
//!
//! "ringkas" is Indonesian for "concise"

pub mod cli;
pub mod config;
pub mod content;
pub mod llm;
pub mod service;
pub mod storage;

use thiserror::Error;

/// Message shown for failures that are not part of the user-facing taxonomy.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Main error type for ringkas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid source type: {0}")]
    InvalidSourceKind(String),

    #[error("Invalid summary style: {0}")]
    InvalidSummaryStyle(String),

    #[error("Text is too short. Please provide at least {min} characters.")]
    ContentTooShort { min: usize },

    #[error("Failed to fetch article: {0}")]
    FetchFailed(String),

    #[error("Failed to fetch article: Could not extract meaningful content from the URL. The page may be behind a paywall or use dynamic content.")]
    ExtractionTooShort,

    #[error("Failed to fetch YouTube transcript: Invalid YouTube URL. Please provide a valid YouTube video link.")]
    InvalidYoutubeUrl,

    #[error("Failed to fetch YouTube transcript: {0}")]
    NoTranscriptAvailable(String),

    #[error("Failed to generate summary. Please try again.")]
    GenerationFailed,

    #[error("Summary not found.")]
    NotFound,

    #[error("You do not have permission to access this summary.")]
    PermissionDenied,

    /// Required settings are missing or invalid
    #[error("{0}")]
    Configuration(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Message that is safe to show to the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unexpected(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "ringkas";
