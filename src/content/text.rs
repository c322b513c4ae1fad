//! Raw text passthrough

use crate::content::{NormalizedContent, SourceKind};
use crate::{Error, Result};

/// Number of characters kept as the display snippet of a text submission.
pub const SNIPPET_CHARS: usize = 100;

const TRUNCATION_MARKER: &str = "...";

/// Validate raw text input and wrap it as normalized content.
pub fn normalize_text(input: &str, min_chars: usize) -> Result<NormalizedContent> {
    let trimmed = input.trim();
    if trimmed.chars().count() < min_chars {
        return Err(Error::ContentTooShort { min: min_chars });
    }

    Ok(NormalizedContent {
        source_kind: SourceKind::Text,
        original_source: snippet(trimmed),
        processed_text: trimmed.to_string(),
    })
}

fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_input_after_trimming() {
        for input in ["", "short", "   123456789   ", "\n\t abc \n"] {
            let err = normalize_text(input, 10).unwrap_err();
            assert!(matches!(err, Error::ContentTooShort { min: 10 }), "{input:?}");
        }
    }

    #[test]
    fn keeps_trimmed_text_without_collapsing_whitespace() {
        let content = normalize_text("  first line\n\n   second line  ", 10).unwrap();
        assert_eq!(content.source_kind, SourceKind::Text);
        assert_eq!(content.processed_text, "first line\n\n   second line");
        assert_eq!(content.original_source, "first line\n\n   second line");
    }

    #[test]
    fn long_input_gets_truncated_snippet() {
        let input = "a".repeat(150);
        let content = normalize_text(&input, 10).unwrap();
        assert_eq!(content.original_source, format!("{}...", "a".repeat(100)));
        assert_eq!(content.processed_text.len(), 150);
    }

    #[test]
    fn exactly_one_hundred_chars_has_no_marker() {
        let input = "b".repeat(100);
        let content = normalize_text(&input, 10).unwrap();
        assert_eq!(content.original_source, input);
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let input = "é".repeat(120);
        let content = normalize_text(&input, 10).unwrap();
        assert_eq!(content.original_source, format!("{}...", "é".repeat(100)));
    }
}
