//! Article fetching and main-text extraction

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};

use crate::config::ContentSettings;
use crate::content::{NormalizedContent, SourceKind};
use crate::Error;

/// Elements that never carry article text.
const BOILERPLATE_SELECTOR: &str = "script, style, nav, header, footer, aside, iframe, noscript";

/// Candidate containers for the main article body, in evaluation order.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    r#"[role="main"]"#,
    ".post-content",
    ".article-content",
    ".entry-content",
];

/// Raw HTTP response as seen by the extractor.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status code with its canonical reason, e.g. `404 Not Found`.
    pub fn status_line(&self) -> String {
        match StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
        {
            Some(reason) => format!("{} {}", self.status, reason),
            None => self.status.to_string(),
        }
    }
}

/// Fetches web pages for the article strategy.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedPage>;
}

/// `PageFetcher` backed by a shared reqwest client.
pub struct HttpPageFetcher {
    http: Client,
    user_agent: String,
}

impl HttpPageFetcher {
    pub fn new(http: Client, user_agent: impl Into<String>) -> Self {
        Self {
            http,
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn get(&self, url: &str) -> Result<FetchedPage> {
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .context("request failed")?;

        let status = response.status();
        let body = if status.is_success() {
            response
                .text()
                .await
                .context("failed to read response body")?
        } else {
            String::new()
        };

        Ok(FetchedPage {
            status: status.as_u16(),
            body,
        })
    }
}

/// Fetch `url` and extract its main text.
pub async fn fetch_article(
    pages: &dyn PageFetcher,
    url: &str,
    settings: &ContentSettings,
) -> crate::Result<NormalizedContent> {
    tracing::info!(url, "Fetching article");

    let page = pages.get(url).await.map_err(|e| {
        tracing::warn!(url, error = %format!("{e:#}"), "Article fetch error");
        Error::FetchFailed(format!("{e:#}"))
    })?;

    if !page.is_success() {
        tracing::warn!(url, status = page.status, "Article fetch returned error status");
        return Err(Error::FetchFailed(format!(
            "Failed to fetch URL: {}",
            page.status_line()
        )));
    }

    let processed_text = extract_article_text(&page.body, settings)?;
    tracing::debug!(url, chars = processed_text.chars().count(), "Article text extracted");

    Ok(NormalizedContent {
        source_kind: SourceKind::Url,
        original_source: url.to_string(),
        processed_text,
    })
}

/// Extract whitespace-collapsed main text from an HTML document.
///
/// Boilerplate elements are removed first. Each content selector contributes
/// the text of all its matches; the longest candidate wins. When no candidate
/// reaches `body_fallback_chars`, the text of the whole body is used instead.
pub fn extract_article_text(html: &str, settings: &ContentSettings) -> crate::Result<String> {
    let mut document = Html::parse_document(html);

    let boilerplate = parse_selector(BOILERPLATE_SELECTOR)?;
    let doomed: Vec<_> = document.select(&boilerplate).map(|el| el.id()).collect();
    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let mut best = String::new();
    let mut best_len = 0;
    for css in CONTENT_SELECTORS {
        let selector = parse_selector(css)?;
        let text: String = document.select(&selector).flat_map(|el| el.text()).collect();
        let text = text.trim();
        let len = text.chars().count();
        if len > best_len {
            tracing::debug!(selector = css, chars = len, "New best content container");
            best = text.to_string();
            best_len = len;
        }
    }

    if best_len < settings.body_fallback_chars {
        tracing::debug!(chars = best_len, "No usable content container, falling back to body");
        let body = parse_selector("body")?;
        let text: String = document.select(&body).flat_map(|el| el.text()).collect();
        best = text.trim().to_string();
    }

    let collapsed = collapse_whitespace(&best);
    if collapsed.chars().count() < settings.min_article_chars {
        return Err(Error::ExtractionTooShort);
    }

    Ok(collapsed)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_selector(css: &str) -> crate::Result<Selector> {
    Selector::parse(css)
        .map_err(|e| Error::Unexpected(format!("invalid selector '{}': {:?}", css, e)))
}
