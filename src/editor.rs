//! Editor view - the host that owns the text and drives the services
//!
//! The view keeps the buffer highlighted after every edit, keeps the gutter
//! metrics in step with the configured font size and draws itself onto a
//! terminal surface.

use std::io::Write;
use std::ops::Range;

use tracing::debug;

use crate::buffer::SpannedText;
use crate::config::EditorConfig;
use crate::display::{self, Frame, Theme};
use crate::error::Result;
use crate::gutter::{render_line_numbers, GutterMetrics, LineNumber};
use crate::layout::WrappedLayout;
use crate::syntax::Highlighter;
use crate::terminal::Surface;

/// Widest gutter drawn on a terminal, in cells
const MAX_GUTTER_CELLS: u16 = 8;

/// A LaTeX editor: highlighted text, line numbers, configuration
#[derive(Debug)]
pub struct EditorView {
    buffer: SpannedText,
    highlighter: Highlighter,
    config: EditorConfig,
    metrics: GutterMetrics,
    theme: Theme,
    /// First visual line on screen
    top_line: usize,
}

impl EditorView {
    /// Create an empty editor with the built-in LaTeX rules
    pub fn new(config: EditorConfig) -> Result<Self> {
        Ok(Self::with_highlighter(config, Highlighter::latex()?))
    }

    /// Create an empty editor with custom rules
    pub fn with_highlighter(config: EditorConfig, highlighter: Highlighter) -> Self {
        Self {
            buffer: SpannedText::new(),
            highlighter,
            config,
            metrics: GutterMetrics::from_font(config.font_size, config.scaled_density),
            theme: Theme::default(),
            top_line: 0,
        }
    }

    /// The text and its spans
    pub fn buffer(&self) -> &SpannedText {
        &self.buffer
    }

    /// The text
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Current configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Gutter metrics for the configured font
    pub fn metrics(&self) -> &GutterMetrics {
        &self.metrics
    }

    /// Replace the colors used by [`EditorView::draw`]
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.buffer.set_text(text);
        self.top_line = 0;
        self.highlighter.highlight_all(&mut self.buffer)
    }

    /// Replace a byte range of the text
    pub fn replace_range(&mut self, range: Range<usize>, with: &str) -> Result<()> {
        self.buffer.replace_range(range, with)?;
        // Math and groups can reach across the edit, so recolor everything
        self.highlighter.highlight_all(&mut self.buffer)
    }

    /// Insert text at a byte position
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
        self.replace_range(pos..pos, text)
    }

    /// Delete a byte range
    pub fn delete(&mut self, range: Range<usize>) -> Result<()> {
        self.replace_range(range, "")
    }

    /// Recolor `start..end` only
    pub fn highlight(&mut self, start: usize, end: usize) -> Result<()> {
        self.highlighter.highlight(&mut self.buffer, start, end)
    }

    /// Apply a new configuration
    pub fn on_config_changed(&mut self, config: EditorConfig) {
        self.config = config;
        self.refresh_font_size();
    }

    /// Recompute the gutter metrics from the configured font size
    pub fn refresh_font_size(&mut self) {
        self.metrics = GutterMetrics::from_font(self.config.font_size, self.config.scaled_density);
        debug!(
            font_size = self.config.font_size,
            padding_left = self.metrics.padding_left,
            "font size refreshed"
        );
    }

    /// Lay out the text in rows of `columns`
    pub fn layout(&self, columns: usize) -> WrappedLayout {
        WrappedLayout::with_tabs(self.text(), columns, self.config.tab_size)
    }

    /// Line numbers for a layout `columns` wide, positioned with the font metrics
    pub fn line_numbers(&self, columns: usize) -> Vec<LineNumber> {
        render_line_numbers(&self.layout(columns), &self.metrics)
    }

    /// First visual line on screen
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Scroll so `visual_line` is the first row; rows past the end draw empty
    pub fn scroll_to(&mut self, visual_line: usize) {
        self.top_line = visual_line;
    }

    /// Gutter width in cells for the current text
    pub fn gutter_cells(&self) -> u16 {
        let lines = self.text().matches('\n').count() + 1;
        let digits = lines.to_string().len() as u16;
        // One blank cell on each side of the numbers
        (digits + 2).min(MAX_GUTTER_CELLS)
    }

    /// Draw the editor into a `width` x `height` character grid
    pub fn draw<W: Write>(&self, out: W, width: u16, height: u16) -> Result<W> {
        let gutter = self.gutter_cells();
        let columns = width.saturating_sub(gutter + 1) as usize;
        let layout = self.layout(columns.max(1));
        let metrics = GutterMetrics::cells(gutter);
        let frame = Frame {
            buffer: &self.buffer,
            layout: &layout,
            metrics: &metrics,
            theme: &self.theme,
            top_line: self.top_line,
            height,
            tab_width: self.config.tab_size,
        };

        let mut surface = Surface::new(out);
        display::render(&mut surface, &frame)?;
        Ok(surface.into_inner())
    }
}
