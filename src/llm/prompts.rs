use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Persona and global rules sent with every summary request.
///
/// No language is passed explicitly; the model must answer in the language
/// of the content.
pub const SYSTEM_INSTRUCTION: &str = "You are 'RingkasCepat', a highly advanced AI summarization assistant. \
Your goal is to provide summaries that are clear, concise, accurate, and easy to understand. \
Follow the user's instructions for the summary format precisely. \
All responses should be in the same language as the input text.";

/// Output format requested for a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    BulletPoints,
    ShortParagraph,
    ExplainLikeFive,
}

impl SummaryStyle {
    pub const ALL: [SummaryStyle; 3] = [
        Self::BulletPoints,
        Self::ShortParagraph,
        Self::ExplainLikeFive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BulletPoints => "bullet_points",
            Self::ShortParagraph => "short_paragraph",
            Self::ExplainLikeFive => "explain_like_five",
        }
    }

    /// Human-friendly label
    pub fn label(&self) -> &'static str {
        match self {
            Self::BulletPoints => "Bullet Points",
            Self::ShortParagraph => "Short Paragraph",
            Self::ExplainLikeFive => "ELI5",
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            Self::BulletPoints => {
                "Based on the following text, provide the 3-5 most important key bullet points:"
            }
            Self::ShortParagraph => {
                "Summarize the following text into a single, well-written paragraph of approximately 100 words:"
            }
            Self::ExplainLikeFive => {
                "Explain the main idea of the following text as if you were talking to a 5-year-old child:"
            }
        }
    }
}

impl FromStr for SummaryStyle {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "bullet_points" => Ok(Self::BulletPoints),
            "short_paragraph" => Ok(Self::ShortParagraph),
            "explain_like_five" => Ok(Self::ExplainLikeFive),
            other => Err(Error::InvalidSummaryStyle(other.to_string())),
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the deterministic prompt for `style` around `content`.
pub fn build_style_prompt(style: SummaryStyle, content: &str) -> String {
    format!("{}\n\n{}", style.instruction(), content)
}
