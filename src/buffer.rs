//! Text buffer with styled spans
//!
//! The highlighter only talks to the [`TextBuffer`] trait, so any host
//! that keeps text and color spans together can be highlighted.
//! [`SpannedText`] is the buffer used by the editor view.

use std::ops::Range;

use crate::error::{EditorError, Result};
use crate::syntax::{StyleSpan, TokenType};

/// Text plus an ordered list of style spans
pub trait TextBuffer {
    /// Length of the text in bytes
    fn len(&self) -> usize;

    /// Check if the buffer holds no text
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a range of the text, `None` if out of bounds or not on char boundaries
    fn slice(&self, range: Range<usize>) -> Option<&str>;

    /// All spans, in the order they were added
    fn spans(&self) -> &[StyleSpan];

    /// Remove styling from `range`; spans straddling its edges keep their outside part
    fn clear_spans(&mut self, range: Range<usize>);

    /// Append a span; later spans win over earlier ones where they overlap
    fn add_span(&mut self, span: StyleSpan);
}

/// Check that `start..end` is a valid, char-aligned range of `text`
pub fn validate_range(text: &str, start: usize, end: usize) -> Result<()> {
    if start > end || end > text.len() {
        return Err(EditorError::InvalidRange {
            start,
            end,
            len: text.len(),
        });
    }
    for pos in [start, end] {
        if !text.is_char_boundary(pos) {
            return Err(EditorError::NotCharBoundary(pos));
        }
    }
    Ok(())
}

/// A string buffer carrying foreground color spans
#[derive(Debug, Clone, Default)]
pub struct SpannedText {
    /// The text content, newlines included
    text: String,
    /// Spans in application order
    spans: Vec<StyleSpan>,
}

impl SpannedText {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text content
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Replace the whole text, dropping all spans
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.spans.clear();
    }

    /// Replace `range` with `with`, shifting spans after the edit
    ///
    /// Spans behave as exclusive on both ends: text inserted at a span's
    /// boundary is not covered, text inserted strictly inside it is.
    pub fn replace_range(&mut self, range: Range<usize>, with: &str) -> Result<()> {
        validate_range(&self.text, range.start, range.end)?;
        self.text.replace_range(range.clone(), with);

        let removed = range.end - range.start;
        let inserted = with.len();
        let shift = |pos: usize| pos - removed + inserted;

        self.spans = self
            .spans
            .iter()
            .filter_map(|span| {
                if span.end <= range.start {
                    Some(*span)
                } else if span.start >= range.end {
                    Some(StyleSpan::new(shift(span.start), shift(span.end), span.token))
                } else if span.start < range.start && span.end > range.end {
                    Some(StyleSpan::new(span.start, shift(span.end), span.token))
                } else if span.start < range.start {
                    Some(StyleSpan::new(span.start, range.start, span.token))
                } else if span.end > range.end {
                    Some(StyleSpan::new(range.start + inserted, shift(span.end), span.token))
                } else {
                    None
                }
            })
            .filter(|span| !span.is_empty())
            .collect();
        Ok(())
    }

    /// Insert text at a byte position
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
        self.replace_range(pos..pos, text)
    }

    /// Delete a byte range
    pub fn delete(&mut self, range: Range<usize>) -> Result<()> {
        self.replace_range(range, "")
    }

    /// The token coloring a byte position: the last added span covering it
    pub fn token_at(&self, pos: usize) -> Option<TokenType> {
        self.spans
            .iter()
            .rev()
            .find(|span| span.contains(pos))
            .map(|span| span.token)
    }
}

impl TextBuffer for SpannedText {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.text.get(range)
    }

    fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    fn clear_spans(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let mut kept = Vec::with_capacity(self.spans.len());
        for span in &self.spans {
            if !span.overlaps(range.start, range.end) {
                kept.push(*span);
                continue;
            }
            if span.start < range.start {
                kept.push(StyleSpan::new(span.start, range.start, span.token));
            }
            if span.end > range.end {
                kept.push(StyleSpan::new(range.end, span.end, span.token));
            }
        }
        self.spans = kept;
    }

    fn add_span(&mut self, span: StyleSpan) {
        if !span.is_empty() {
            self.spans.push(span);
        }
    }
}

impl From<&str> for SpannedText {
    fn from(s: &str) -> Self {
        Self {
            text: s.to_string(),
            spans: Vec::new(),
        }
    }
}

impl From<String> for SpannedText {
    fn from(s: String) -> Self {
        Self {
            text: s,
            spans: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, token: TokenType) -> StyleSpan {
        StyleSpan::new(start, end, token)
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("hello", 0, 5).is_ok());
        assert!(validate_range("hello", 2, 2).is_ok());
        assert!(matches!(
            validate_range("hello", 3, 2),
            Err(EditorError::InvalidRange { start: 3, end: 2, len: 5 })
        ));
        assert!(matches!(
            validate_range("hello", 0, 6),
            Err(EditorError::InvalidRange { .. })
        ));
        // 'é' occupies bytes 3..5
        assert!(matches!(
            validate_range("café", 0, 4),
            Err(EditorError::NotCharBoundary(4))
        ));
    }

    #[test]
    fn test_slice() {
        let buffer = SpannedText::from("\\emph{x}");
        assert_eq!(buffer.slice(0..5), Some("\\emph"));
        assert_eq!(buffer.slice(5..8), Some("{x}"));
        assert_eq!(buffer.slice(5..20), None);
        assert_eq!(buffer.len(), 8);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_clear_spans_clips_straddling() {
        let mut buffer = SpannedText::from("0123456789");
        buffer.add_span(span(0, 4, TokenType::Command));
        buffer.add_span(span(4, 6, TokenType::Group));
        buffer.add_span(span(5, 10, TokenType::Math));

        buffer.clear_spans(2..7);

        assert_eq!(
            buffer.spans(),
            &[span(0, 2, TokenType::Command), span(7, 10, TokenType::Math)]
        );
    }

    #[test]
    fn test_clear_spans_splits_enclosing() {
        let mut buffer = SpannedText::from("0123456789");
        buffer.add_span(span(0, 10, TokenType::Comment));
        buffer.clear_spans(3..5);
        assert_eq!(
            buffer.spans(),
            &[span(0, 3, TokenType::Comment), span(5, 10, TokenType::Comment)]
        );
    }

    #[test]
    fn test_token_at_last_wins() {
        let mut buffer = SpannedText::from("$x$");
        buffer.add_span(span(0, 3, TokenType::Math));
        buffer.add_span(span(0, 1, TokenType::MathDelimiter));
        assert_eq!(buffer.token_at(0), Some(TokenType::MathDelimiter));
        assert_eq!(buffer.token_at(1), Some(TokenType::Math));
        assert_eq!(buffer.token_at(3), None);
    }

    #[test]
    fn test_add_empty_span_ignored() {
        let mut buffer = SpannedText::from("abc");
        buffer.add_span(span(1, 1, TokenType::Group));
        assert!(buffer.spans().is_empty());
    }

    #[test]
    fn test_insert_shifts_spans() {
        let mut buffer = SpannedText::from("ab{cd}");
        buffer.add_span(span(2, 6, TokenType::Group));

        buffer.insert(0, "xx").unwrap();
        assert_eq!(buffer.as_str(), "xxab{cd}");
        assert_eq!(buffer.spans(), &[span(4, 8, TokenType::Group)]);

        // Inside the span: it grows
        buffer.insert(6, "Z").unwrap();
        assert_eq!(buffer.spans(), &[span(4, 9, TokenType::Group)]);

        // At its end: it does not
        buffer.insert(9, "!").unwrap();
        assert_eq!(buffer.as_str(), "xxab{cZd}!");
        assert_eq!(buffer.spans(), &[span(4, 9, TokenType::Group)]);
    }

    #[test]
    fn test_delete_clips_spans() {
        let mut buffer = SpannedText::from("0123456789");
        buffer.add_span(span(0, 4, TokenType::Command));
        buffer.add_span(span(4, 6, TokenType::Group));
        buffer.add_span(span(6, 10, TokenType::Math));

        buffer.delete(3..7).unwrap();

        assert_eq!(buffer.as_str(), "012789");
        assert_eq!(
            buffer.spans(),
            &[span(0, 3, TokenType::Command), span(3, 6, TokenType::Math)]
        );
    }

    #[test]
    fn test_replace_invalid_range() {
        let mut buffer = SpannedText::from("abc");
        assert!(buffer.replace_range(2..9, "x").is_err());
        assert_eq!(buffer.as_str(), "abc");
    }

    #[test]
    fn test_set_text_drops_spans() {
        let mut buffer = SpannedText::from("abc");
        buffer.add_span(span(0, 3, TokenType::Command));
        buffer.set_text("xyz");
        assert_eq!(buffer.as_str(), "xyz");
        assert!(buffer.spans().is_empty());
    }
}
