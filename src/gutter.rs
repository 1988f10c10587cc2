//! Line number gutter
//!
//! Numbers go beside visual lines, but only beside the first row of each
//! logical line: rows produced by soft wrapping belong to the line above
//! them and stay blank.

use tracing::debug;

use crate::layout::LineLayout;

/// Line height as a multiple of the text size
pub const LINE_SPACING: f32 = 1.2;

/// Gutter geometry, derived from the font size only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GutterMetrics {
    /// Height of one visual line
    pub line_height: f32,
    /// Vertical offset applied to every number (numbers sit slightly high)
    pub padding_top: f32,
    /// Left padding of the text: gutter column plus the margin before text
    pub padding_left: f32,
    /// Width of the gutter column
    pub column_width: f32,
    /// Gap between the right edge of the numbers and the column border
    pub column_margin: f32,
    /// Glyph size for the numbers
    pub number_size: f32,
}

impl GutterMetrics {
    /// Metrics for a font size in points at a display density
    ///
    /// Numbers are drawn three points smaller than the text.
    pub fn from_font(font_size: f32, scaled_density: f32) -> Self {
        let line_height = font_size * scaled_density * LINE_SPACING;
        let metrics = Self::with_line_height(line_height, (font_size - 3.0) * scaled_density);
        debug!(font_size, scaled_density, line_height, "gutter metrics computed");
        metrics
    }

    /// Metrics for a line height measured by the host
    pub fn with_line_height(line_height: f32, number_size: f32) -> Self {
        let padding_left = line_height * 3.0;
        let margin_before_text = padding_left * 0.2;
        let column_width = padding_left - margin_before_text;
        Self {
            line_height,
            padding_top: -(line_height * 0.10),
            padding_left,
            column_width,
            column_margin: column_width / 6.0,
            number_size,
        }
    }

    /// Metrics for a character grid where each visual line is one row
    ///
    /// `line_y` then yields the row index directly.
    pub fn cells(column_width: u16) -> Self {
        Self {
            line_height: 1.0,
            padding_top: -1.0,
            padding_left: f32::from(column_width) + 1.0,
            column_width: f32::from(column_width),
            column_margin: 1.0,
            number_size: 1.0,
        }
    }

    /// Horizontal position of the numbers' right edge
    pub fn number_x(&self) -> f32 {
        self.column_width - self.column_margin
    }

    /// Vertical position of the number for a visual line
    pub fn line_y(&self, visual_line: usize) -> f32 {
        (visual_line + 1) as f32 * self.line_height + self.padding_top
    }
}

/// A number to draw beside a visual line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineNumber {
    /// Visual line the number belongs to
    pub visual_line: usize,
    /// Logical line number, starting at 1
    pub number: usize,
    /// Vertical drawing position
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberingState {
    /// The next visual line starts a logical line
    Ready,
    /// Inside a soft-wrapped logical line, waiting for its hard break
    AwaitingNewline,
}

/// Iterator over the numbers of a layout, in visual line order
#[derive(Debug)]
pub struct LineNumbers<'a, L: LineLayout + ?Sized> {
    layout: &'a L,
    metrics: &'a GutterMetrics,
    next_line: usize,
    next_number: usize,
    state: NumberingState,
}

impl<'a, L: LineLayout + ?Sized> LineNumbers<'a, L> {
    /// Start numbering `layout` from its first visual line
    pub fn new(layout: &'a L, metrics: &'a GutterMetrics) -> Self {
        Self {
            layout,
            metrics,
            next_line: 0,
            next_number: 1,
            state: NumberingState::Ready,
        }
    }
}

impl<L: LineLayout + ?Sized> Iterator for LineNumbers<'_, L> {
    type Item = LineNumber;

    fn next(&mut self) -> Option<LineNumber> {
        while self.next_line < self.layout.line_count() {
            let line = self.next_line;
            self.next_line += 1;
            let hard_break = self.layout.line_has_hard_break(line);

            match self.state {
                NumberingState::Ready => {
                    let item = LineNumber {
                        visual_line: line,
                        number: self.next_number,
                        y: self.metrics.line_y(line),
                    };
                    self.next_number += 1;
                    if !hard_break {
                        self.state = NumberingState::AwaitingNewline;
                    }
                    return Some(item);
                }
                NumberingState::AwaitingNewline => {
                    if hard_break {
                        self.state = NumberingState::Ready;
                    }
                }
            }
        }
        None
    }
}

/// Compute every line number for `layout`
pub fn render_line_numbers<L>(layout: &L, metrics: &GutterMetrics) -> Vec<LineNumber>
where
    L: LineLayout + ?Sized,
{
    LineNumbers::new(layout, metrics).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::WrappedLayout;
    use std::ops::Range;

    /// Layout given directly as its visual rows
    struct Rows {
        text: String,
        bounds: Vec<Range<usize>>,
    }

    impl Rows {
        fn new(rows: &[&str]) -> Self {
            let mut text = String::new();
            let mut bounds = Vec::new();
            for row in rows {
                let start = text.len();
                text.push_str(row);
                bounds.push(start..text.len());
            }
            Self { text, bounds }
        }
    }

    impl LineLayout for Rows {
        fn line_count(&self) -> usize {
            self.bounds.len()
        }

        fn line_start(&self, line: usize) -> usize {
            self.bounds[line].start
        }

        fn line_end(&self, line: usize) -> usize {
            self.bounds[line].end
        }

        fn contains_hard_break(&self, range: Range<usize>) -> bool {
            self.text[range].contains('\n')
        }
    }

    fn numbered(layout: &dyn LineLayout) -> Vec<(usize, usize)> {
        render_line_numbers(layout, &GutterMetrics::cells(4))
            .iter()
            .map(|n| (n.visual_line, n.number))
            .collect()
    }

    #[test]
    fn test_soft_wrap_suppresses_numbers() {
        let layout = Rows::new(&["abc\n", "def", "ghi\n", "jkl\n"]);
        assert_eq!(numbered(&layout), vec![(0, 1), (1, 2), (3, 3)]);
    }

    #[test]
    fn test_every_hard_line_numbered() {
        let layout = Rows::new(&["a\n", "b\n", "c"]);
        assert_eq!(numbered(&layout), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_long_wrapped_line() {
        let layout = Rows::new(&["aaa", "aaa", "aa\n", "b"]);
        assert_eq!(numbered(&layout), vec![(0, 1), (3, 2)]);
    }

    #[test]
    fn test_zero_lines() {
        let layout = Rows::new(&[]);
        assert!(numbered(&layout).is_empty());
    }

    #[test]
    fn test_wrapped_layout_numbers() {
        let text = "\\section{A long title}\n\\label{x}\n";
        let layout = WrappedLayout::new(text, 12);
        // Rows: "\section{A ", "long title}\n", "\label{x}\n", ""
        assert_eq!(layout.line_count(), 4);
        assert_eq!(numbered(&layout), vec![(0, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_positions() {
        let metrics = GutterMetrics::with_line_height(20.0, 11.0);
        let layout = Rows::new(&["a\n", "b\n"]);
        let numbers = render_line_numbers(&layout, &metrics);
        assert_eq!(numbers[0].y, 18.0);
        assert_eq!(numbers[1].y, 38.0);
    }

    #[test]
    fn test_cell_positions_are_rows() {
        let metrics = GutterMetrics::cells(5);
        assert_eq!(metrics.line_y(0), 0.0);
        assert_eq!(metrics.line_y(7), 7.0);
        assert_eq!(metrics.number_x(), 4.0);
    }

    #[test]
    fn test_metrics_from_font() {
        let metrics = GutterMetrics::from_font(10.0, 2.0);
        assert!((metrics.line_height - 24.0).abs() < 1e-4);
        assert!((metrics.padding_left - 72.0).abs() < 1e-4);
        assert!((metrics.column_width - 57.6).abs() < 1e-4);
        assert!((metrics.column_margin - 9.6).abs() < 1e-4);
        assert!((metrics.padding_top + 2.4).abs() < 1e-4);
        assert!((metrics.number_size - 14.0).abs() < 1e-4);
    }
}
