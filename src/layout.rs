//! Visual line layout
//!
//! A layout maps visual lines (rows after soft wrapping) to byte ranges of
//! the text. Each visual line that ends a logical line includes its `\n`.

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visual line geometry supplied by the host display
pub trait LineLayout {
    /// Number of visual lines
    fn line_count(&self) -> usize;

    /// Byte offset where a visual line starts
    fn line_start(&self, line: usize) -> usize;

    /// Byte offset where a visual line ends (exclusive)
    fn line_end(&self, line: usize) -> usize;

    /// Check if the text in `range` contains a hard line break
    fn contains_hard_break(&self, range: Range<usize>) -> bool;

    /// Check if a visual line contains a hard line break
    fn line_has_hard_break(&self, line: usize) -> bool {
        self.contains_hard_break(self.line_start(line)..self.line_end(line))
    }
}

/// Greedy soft-wrapping layout over a string
///
/// Lines are broken after the last space that fits, or mid-word when a
/// word is wider than the row. Like a text widget, the layout always has
/// at least one line and a trailing `\n` opens an empty last line.
#[derive(Debug, Clone)]
pub struct WrappedLayout {
    /// Byte range of each visual line
    lines: Vec<Range<usize>>,
    /// Byte offsets of every `\n`, ascending
    newlines: Vec<usize>,
    /// Length of the laid out text
    text_len: usize,
}

impl WrappedLayout {
    /// Lay out `text` in rows of `width` columns; a width of 0 disables wrapping
    ///
    /// Tabs count as a single column.
    pub fn new(text: &str, width: usize) -> Self {
        Self::with_tabs(text, width, 1)
    }

    /// Lay out `text` with tab stops every `tab_width` columns
    pub fn with_tabs(text: &str, width: usize, tab_width: usize) -> Self {
        let tab_width = tab_width.max(1);
        let mut lines = Vec::new();
        let mut offset = 0;

        for segment in text.split_inclusive('\n') {
            wrap_segment(text, offset..offset + segment.len(), width, tab_width, &mut lines);
            offset += segment.len();
        }
        if text.is_empty() || text.ends_with('\n') {
            lines.push(text.len()..text.len());
        }

        let newlines = text
            .char_indices()
            .filter(|&(_, ch)| ch == '\n')
            .map(|(pos, _)| pos)
            .collect();

        Self {
            lines,
            newlines,
            text_len: text.len(),
        }
    }

    /// Byte range of a visual line
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        self.lines.get(line).cloned()
    }

    /// Visual line containing a byte offset (the last line for the end of text)
    pub fn line_for_offset(&self, offset: usize) -> usize {
        let idx = self.lines.partition_point(|r| r.end <= offset);
        idx.min(self.lines.len().saturating_sub(1))
    }
}

/// Columns taken by `ch` when it starts at column `col`
pub fn char_columns(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width - col % tab_width
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(1)
    }
}

/// Columns taken by `s` when it starts a row
pub fn str_columns(s: &str, tab_width: usize) -> usize {
    if !s.contains('\t') {
        return s.width();
    }
    s.chars().fold(0, |col, ch| col + char_columns(ch, col, tab_width))
}

/// Push the visual lines of one logical line (its `\n` included)
fn wrap_segment(
    text: &str,
    segment: Range<usize>,
    width: usize,
    tab_width: usize,
    out: &mut Vec<Range<usize>>,
) {
    let mut row_start = segment.start;
    let mut col = 0;
    let mut last_space: Option<usize> = None;

    for (rel, ch) in text[segment.clone()].char_indices() {
        if ch == '\n' {
            break;
        }
        let pos = segment.start + rel;
        let mut ch_width = char_columns(ch, col, tab_width);

        if width > 0 && col + ch_width > width && pos > row_start {
            let break_at = last_space.filter(|&b| b > row_start).unwrap_or(pos);
            out.push(row_start..break_at);
            row_start = break_at;
            col = str_columns(&text[row_start..pos], tab_width);
            ch_width = char_columns(ch, col, tab_width);
            last_space = None;
        }

        col += ch_width;
        if ch == ' ' {
            last_space = Some(pos + 1);
        }
    }

    out.push(row_start..segment.end);
}

impl LineLayout for WrappedLayout {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_start(&self, line: usize) -> usize {
        self.lines.get(line).map_or(self.text_len, |r| r.start)
    }

    fn line_end(&self, line: usize) -> usize {
        self.lines.get(line).map_or(self.text_len, |r| r.end)
    }

    fn contains_hard_break(&self, range: Range<usize>) -> bool {
        let idx = self.newlines.partition_point(|&pos| pos < range.start);
        self.newlines.get(idx).is_some_and(|&pos| pos < range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(layout: &WrappedLayout, text: &str) -> Vec<String> {
        (0..layout.line_count())
            .map(|i| text[layout.line_start(i)..layout.line_end(i)].to_string())
            .collect()
    }

    #[test]
    fn test_no_wrap() {
        let text = "abc\ndef\n";
        let layout = WrappedLayout::new(text, 0);
        assert_eq!(rows(&layout, text), vec!["abc\n", "def\n", ""]);
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let layout = WrappedLayout::new("", 10);
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.line_range(0), Some(0..0));
        assert!(!layout.line_has_hard_break(0));
    }

    #[test]
    fn test_wraps_at_space() {
        let text = "hello big world\nx";
        let layout = WrappedLayout::new(text, 10);
        assert_eq!(rows(&layout, text), vec!["hello big ", "world\n", "x"]);
        assert!(!layout.line_has_hard_break(0));
        assert!(layout.line_has_hard_break(1));
        assert!(!layout.line_has_hard_break(2));
    }

    #[test]
    fn test_wraps_long_word() {
        let text = "abcdefgh";
        let layout = WrappedLayout::new(text, 3);
        assert_eq!(rows(&layout, text), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wide_chars() {
        // Each CJK character is two columns wide
        let text = "你好世界";
        let layout = WrappedLayout::new(text, 4);
        assert_eq!(rows(&layout, text), vec!["你好", "世界"]);
    }

    #[test]
    fn test_tab_stops() {
        assert_eq!(str_columns("\tx", 4), 5);
        assert_eq!(str_columns("ab\tx", 4), 5);
        assert_eq!(str_columns("ab\tx", 1), 4);

        let text = "\t\\item a";
        let layout = WrappedLayout::with_tabs(text, 10, 4);
        assert_eq!(rows(&layout, text), vec!["\t\\item ", "a"]);
    }

    #[test]
    fn test_contains_hard_break() {
        let layout = WrappedLayout::new("ab\ncd\n", 0);
        assert!(layout.contains_hard_break(0..3));
        assert!(!layout.contains_hard_break(0..2));
        assert!(layout.contains_hard_break(3..6));
        assert!(!layout.contains_hard_break(3..5));
        assert!(!layout.contains_hard_break(4..4));
    }

    #[test]
    fn test_line_for_offset() {
        let text = "hello big world\nx";
        let layout = WrappedLayout::new(text, 10);
        assert_eq!(layout.line_for_offset(0), 0);
        assert_eq!(layout.line_for_offset(10), 1);
        assert_eq!(layout.line_for_offset(16), 2);
        assert_eq!(layout.line_for_offset(17), 2);
    }
}
