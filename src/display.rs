//! Display rendering
//!
//! Draws the editor on a character grid: a gutter column with its border
//! and line numbers, then the wrapped, highlighted text.

use std::io::Write;
use std::ops::Range;

use crate::buffer::{SpannedText, TextBuffer};
use crate::error::Result;
use crate::gutter::{GutterMetrics, LineNumbers};
use crate::layout::{char_columns, LineLayout, WrappedLayout};
use crate::syntax::{Color, Style, StyleSpan, TokenType};
use crate::terminal::Surface;

/// Colors of the editor chrome and text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Gutter column background
    pub gutter: Style,
    /// Line between gutter and text
    pub border: Style,
    /// Line numbers
    pub line_number: Style,
    /// Text no rule matched
    pub text: Style,
    /// Highlighted text, indexed by token type
    tokens: [Style; TokenType::ALL.len()],
}

impl Default for Theme {
    fn default() -> Self {
        let column = Color::Rgb(0xee, 0xee, 0xee);
        Self {
            gutter: Style::bg(column),
            border: Style::fg(Color::Rgb(0x61, 0x61, 0x61)),
            line_number: Style::fg(Color::Rgb(0x9e, 0x9e, 0x9e)).with_bg(column),
            text: Style::default(),
            tokens: TokenType::ALL.map(|token| token.default_style()),
        }
    }
}

impl Theme {
    /// Style for highlighted text
    pub fn token_style(&self, token: TokenType) -> Style {
        self.tokens[token as usize]
    }

    /// Builder: override the style of one token type
    pub fn with_token_style(mut self, token: TokenType, style: Style) -> Self {
        self.tokens[token as usize] = style;
        self
    }
}

/// Character used for the gutter border
const BORDER: char = '│';

/// What to draw and where
#[derive(Debug)]
pub struct Frame<'a> {
    pub buffer: &'a SpannedText,
    pub layout: &'a WrappedLayout,
    pub metrics: &'a GutterMetrics,
    pub theme: &'a Theme,
    /// First visual line shown
    pub top_line: usize,
    /// Rows available
    pub height: u16,
    pub tab_width: usize,
}

impl Frame<'_> {
    /// Visual lines that land on screen
    fn visible_lines(&self) -> Range<usize> {
        let count = self.layout.line_count();
        let first = self.top_line.min(count);
        first..self.top_line.saturating_add(self.height as usize).min(count)
    }
}

/// Render a frame, top-left at the origin of the surface
pub fn render<W: Write>(surface: &mut Surface<W>, frame: &Frame<'_>) -> Result<()> {
    let column_width = frame.metrics.column_width as usize;
    let text_col = (column_width + 1) as u16;

    let visible = frame.visible_lines();
    let bytes = if visible.is_empty() {
        0..0
    } else {
        frame.layout.line_start(visible.start)..frame.layout.line_end(visible.end - 1)
    };
    let tokens = paint_tokens(frame.buffer.spans(), bytes.clone());

    for row in 0..frame.height {
        surface.move_cursor(row, 0)?;
        surface.apply_style(&frame.theme.gutter)?;
        surface.write_str(&" ".repeat(column_width))?;
        surface.apply_style(&frame.theme.border)?;
        surface.write_str(BORDER.encode_utf8(&mut [0; 4]))?;
        surface.reset_attributes()?;

        let line = frame.top_line.saturating_add(row as usize);
        if visible.contains(&line) {
            surface.move_cursor(row, text_col)?;
            render_line(surface, frame, line, &tokens, bytes.start)?;
        }
        surface.clear_to_eol()?;
    }

    render_numbers(surface, frame)?;
    surface.flush()
}

/// Token of every byte in `range`; later spans paint over earlier ones
fn paint_tokens(spans: &[StyleSpan], range: Range<usize>) -> Vec<Option<TokenType>> {
    let mut tokens = vec![None; range.len()];
    for span in spans.iter().filter(|span| span.overlaps(range.start, range.end)) {
        let from = span.start.max(range.start) - range.start;
        let to = span.end.min(range.end) - range.start;
        tokens[from..to].fill(Some(span.token));
    }
    tokens
}

/// Draw the numbers that fall inside the visible rows
fn render_numbers<W: Write>(surface: &mut Surface<W>, frame: &Frame<'_>) -> Result<()> {
    let bottom = frame.top_line.saturating_add(frame.height as usize);
    let right = frame.metrics.number_x() as usize;

    for number in LineNumbers::new(frame.layout, frame.metrics) {
        let row = number.y.round() as usize;
        if row < frame.top_line {
            continue;
        }
        if row >= bottom {
            break;
        }
        let label = number.number.to_string();
        // Keep the low digits when the number is wider than the column
        let label = &label[label.len().saturating_sub(right)..];
        let col = right - label.len();
        surface.move_cursor((row - frame.top_line) as u16, col as u16)?;
        surface.apply_style(&frame.theme.line_number)?;
        surface.write_str(label)?;
        surface.reset_attributes()?;
    }
    Ok(())
}

/// Draw one visual line, switching style wherever the painted token changes
fn render_line<W: Write>(
    surface: &mut Surface<W>,
    frame: &Frame<'_>,
    line: usize,
    tokens: &[Option<TokenType>],
    base: usize,
) -> Result<()> {
    let start = frame.layout.line_start(line);
    let end = frame.layout.line_end(line);
    let text = &frame.buffer.as_str()[start..end];

    let mut run = String::new();
    let mut run_style = None;
    let mut col = 0;

    for (rel, ch) in text.char_indices() {
        if ch == '\n' {
            break;
        }
        let style = tokens
            .get(start + rel - base)
            .copied()
            .flatten()
            .map_or(frame.theme.text, |token| frame.theme.token_style(token));
        if run_style != Some(style) {
            flush_run(surface, &mut run, run_style)?;
            run_style = Some(style);
        }
        let width = char_columns(ch, col, frame.tab_width);
        if ch == '\t' {
            run.extend(std::iter::repeat(' ').take(width));
        } else {
            run.push(ch);
        }
        col += width;
    }
    flush_run(surface, &mut run, run_style)
}

fn flush_run<W: Write>(surface: &mut Surface<W>, run: &mut String, style: Option<Style>) -> Result<()> {
    if run.is_empty() {
        return Ok(());
    }
    if let Some(style) = style {
        surface.apply_style(&style)?;
    }
    surface.write_str(run)?;
    surface.reset_attributes()?;
    run.clear();
    Ok(())
}
