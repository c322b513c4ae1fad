//! Content normalization for ringkas
//!
//! Turns raw text, article URLs, and YouTube URLs into a single plain-text
//! body ready for summarization.

mod article;
mod text;
mod youtube;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ContentSettings;
use crate::{Error, Result};

pub use article::{extract_article_text, FetchedPage, HttpPageFetcher, PageFetcher};
pub use text::SNIPPET_CHARS;
pub use youtube::{extract_video_id, TranscriptProvider, TranscriptSegment, YoutubeTranscriptClient};

/// Kind of content a summary was made from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Raw text pasted by the user
    Text,
    /// Article at a web URL
    Url,
    /// YouTube video, via its captions
    Youtube,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [Self::Text, Self::Url, Self::Youtube];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Youtube => "youtube",
        }
    }

    /// Human-friendly label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Url => "URL",
            Self::Youtube => "YouTube",
        }
    }
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "url" => Ok(Self::Url),
            "youtube" => Ok(Self::Youtube),
            other => Err(Error::InvalidSourceKind(other.to_string())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain-text body extracted from a source, plus bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent {
    pub source_kind: SourceKind,

    /// URL verbatim, or a display snippet of raw text
    pub original_source: String,

    /// Body handed to the summarizer
    pub processed_text: String,
}

/// Dispatches a submission to the extraction strategy for its source kind.
pub struct Normalizer {
    pages: Arc<dyn PageFetcher>,
    transcripts: Arc<dyn TranscriptProvider>,
    settings: ContentSettings,
}

impl Normalizer {
    pub fn new(
        pages: Arc<dyn PageFetcher>,
        transcripts: Arc<dyn TranscriptProvider>,
        settings: ContentSettings,
    ) -> Self {
        Self {
            pages,
            transcripts,
            settings,
        }
    }

    /// Build the network-backed normalizer around a shared HTTP client.
    pub fn from_settings(settings: &ContentSettings, http: Client) -> Self {
        Self::new(
            Arc::new(HttpPageFetcher::new(http.clone(), &settings.user_agent)),
            Arc::new(YoutubeTranscriptClient::new(http, &settings.user_agent)),
            settings.clone(),
        )
    }

    pub async fn normalize(&self, kind: SourceKind, input: &str) -> Result<NormalizedContent> {
        match kind {
            SourceKind::Text => text::normalize_text(input, self.settings.min_text_chars),
            SourceKind::Url => {
                article::fetch_article(self.pages.as_ref(), input.trim(), &self.settings).await
            }
            SourceKind::Youtube => {
                youtube::fetch_youtube_transcript(self.transcripts.as_ref(), input.trim()).await
            }
        }
    }
}
