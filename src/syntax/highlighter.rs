//! Range highlighter
//!
//! Recolors a range of a [`TextBuffer`] from scratch: the range is cleared,
//! then every rule's matches are added in rule order. Nothing is patched
//! incrementally, so running it twice over unchanged text gives the same
//! spans.

use tracing::trace;

use super::latex::latex_rules;
use super::rules::PatternRule;
use super::style::StyleSpan;
use crate::buffer::TextBuffer;
use crate::error::{EditorError, Result};

/// Applies an ordered rule list to buffer ranges
#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: Vec<PatternRule>,
}

impl Highlighter {
    /// Create a highlighter over a fixed, ordered rule list
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// Create a highlighter with the built-in LaTeX rules
    pub fn latex() -> Result<Self> {
        Ok(Self::new(latex_rules()?))
    }

    /// The rules, in application order
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Compute spans for `text`, offsets relative to its start
    ///
    /// Spans come out grouped by rule, in rule order, so a consumer that
    /// lets later spans override earlier ones sees the last matching rule.
    pub fn compute_spans(&self, text: &str) -> Vec<StyleSpan> {
        self.rules
            .iter()
            .flat_map(|rule| {
                rule.matches(text)
                    .map(move |(start, end)| StyleSpan::new(start, end, rule.token_type))
            })
            .collect()
    }

    /// Replace the styling of `start..end` with freshly computed spans
    ///
    /// Fails without touching the buffer when the range is reversed, out of
    /// bounds or splits a character.
    pub fn highlight<B>(&self, buffer: &mut B, start: usize, end: usize) -> Result<()>
    where
        B: TextBuffer + ?Sized,
    {
        if start > end || end > buffer.len() {
            return Err(EditorError::InvalidRange {
                start,
                end,
                len: buffer.len(),
            });
        }
        let spans = match buffer.slice(start..end) {
            Some(text) => self.compute_spans(text),
            None => {
                let pos = if buffer.slice(start..start).is_none() { start } else { end };
                return Err(EditorError::NotCharBoundary(pos));
            }
        };

        buffer.clear_spans(start..end);
        let count = spans.len();
        for span in spans {
            buffer.add_span(StyleSpan::new(start + span.start, start + span.end, span.token));
        }

        trace!(start, end, spans = count, "highlighted range");
        Ok(())
    }

    /// Highlight the whole buffer
    pub fn highlight_all<B>(&self, buffer: &mut B) -> Result<()>
    where
        B: TextBuffer + ?Sized,
    {
        let len = buffer.len();
        self.highlight(buffer, 0, len)
    }
}
