//! YouTube transcript retrieval

use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::content::{NormalizedContent, SourceKind};
use crate::Error;

static VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:youtu\.be/|youtube\.com(?:/embed/|/v/|/watch\?v=|/watch\?.+&v=))([^&\n?#]+)",
    )
    .expect("video id pattern is valid")
});

const WATCH_URL: &str = "https://www.youtube.com/watch";
const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";

/// A timed fragment of spoken text from a video's captions.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Length of the segment, in seconds
    pub duration: f64,
}

/// Source of caption transcripts.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>>;
}

/// Extract the video identifier from the common YouTube URL shapes.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Retrieve the transcript behind `url` and join it into one text body.
pub async fn fetch_youtube_transcript(
    transcripts: &dyn TranscriptProvider,
    url: &str,
) -> crate::Result<NormalizedContent> {
    let video_id = extract_video_id(url).ok_or(Error::InvalidYoutubeUrl)?;
    tracing::info!(video_id, "Fetching YouTube transcript");

    let segments = transcripts.fetch_transcript(video_id).await.map_err(|e| {
        tracing::warn!(video_id, error = %format!("{e:#}"), "YouTube transcript error");
        Error::NoTranscriptAvailable(format!("Transcript retrieval failed: {e}"))
    })?;

    let processed_text = segments
        .iter()
        .map(|segment| segment.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if processed_text.is_empty() {
        return Err(Error::NoTranscriptAvailable(
            "No transcript available for this video. The video may not have captions enabled."
                .to_string(),
        ));
    }

    tracing::debug!(video_id, segments = segments.len(), "Transcript retrieved");

    Ok(NormalizedContent {
        source_kind: SourceKind::Youtube,
        original_source: url.to_string(),
        processed_text,
    })
}

/// Reads the caption tracks published on a video's watch page.
pub struct YoutubeTranscriptClient {
    http: Client,
    user_agent: String,
    watch_url: String,
}

impl YoutubeTranscriptClient {
    pub fn new(http: Client, user_agent: impl Into<String>) -> Self {
        Self {
            http,
            user_agent: user_agent.into(),
            watch_url: WATCH_URL.to_string(),
        }
    }

    /// Point the client at a different watch page host.
    pub fn with_watch_url(mut self, watch_url: impl Into<String>) -> Self {
        self.watch_url = watch_url.into();
        self
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptClient {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        let watch_page = self
            .get_text(&format!("{}?v={}", self.watch_url, video_id))
            .await
            .context("failed to load watch page")?;

        let tracks = match parse_caption_tracks(&watch_page)? {
            Some(tracks) => tracks,
            None if watch_page.contains("class=\"g-recaptcha\"") => {
                anyhow::bail!("YouTube is rate limiting requests from this address")
            }
            None => return Ok(Vec::new()),
        };

        let Some(track) = tracks.first() else {
            return Ok(Vec::new());
        };
        tracing::debug!(video_id, language = %track.language_code, "Using caption track");

        let xml = self
            .get_text(&track.base_url)
            .await
            .context("failed to load caption track")?;

        parse_timed_text(&xml)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: String,
}

/// Locate the caption track list embedded in a watch page's player response.
///
/// `None` means the page carries no caption tracks at all.
fn parse_caption_tracks(watch_page: &str) -> Result<Option<Vec<CaptionTrack>>> {
    let Some(start) = watch_page.find(CAPTION_TRACKS_MARKER) else {
        return Ok(None);
    };

    let rest = &watch_page[start + CAPTION_TRACKS_MARKER.len()..];
    let tracks = serde_json::Deserializer::from_str(rest)
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .context("caption track list is missing")?
        .context("caption track list is malformed")?;

    Ok(Some(tracks))
}

/// Parse a timed-text document (`<text start=".." dur="..">..</text>`).
fn parse_timed_text(xml: &str) -> Result<Vec<TranscriptSegment>> {
    let document = Html::parse_fragment(xml);
    let selector = Selector::parse("text")
        .map_err(|e| anyhow::anyhow!("invalid timed text selector: {:?}", e))?;

    let segments = document
        .select(&selector)
        .map(|el| {
            let raw: String = el.text().collect();
            TranscriptSegment {
                text: decode_entities(&raw),
                start: parse_seconds(el.value().attr("start")),
                duration: parse_seconds(el.value().attr("dur")),
            }
        })
        .filter(|segment| !segment.text.is_empty())
        .collect();

    Ok(segments)
}

/// Caption text arrives double-escaped (`&amp;#39;`); the markup parser
/// undoes one layer, this undoes the second.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.trim().to_string();
    }
    let fragment = Html::parse_fragment(raw);
    let decoded: String = fragment.root_element().text().collect();
    decoded.trim().to_string()
}

fn parse_seconds(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0.0)
}
