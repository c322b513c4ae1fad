//! Data models for storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{NormalizedContent, SourceKind};
use crate::llm::SummaryStyle;

/// A stored summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sequential identifier assigned by the database
    pub id: i64,

    /// Owner of the summary
    pub user_id: String,

    pub source_kind: SourceKind,

    pub style: SummaryStyle,

    /// URL, or a display snippet of submitted text
    pub original_source: String,

    /// Full text that was sent to the model
    pub processed_text: String,

    /// Model output
    pub summary_text: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A summary that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewSummary {
    pub user_id: String,
    pub source_kind: SourceKind,
    pub style: SummaryStyle,
    pub original_source: String,
    pub processed_text: String,
    pub summary_text: String,
}

impl NewSummary {
    /// Combine normalized content with the generated summary
    pub fn from_content(
        user_id: &str,
        style: SummaryStyle,
        content: NormalizedContent,
        summary_text: String,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            source_kind: content.source_kind,
            style,
            original_source: content.original_source,
            processed_text: content.processed_text,
            summary_text,
        }
    }
}
