//! Drawing surface using crossterm
//!
//! Commands are queued on any writer: stdout for a real terminal, a byte
//! vector in tests.

use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::error::Result;
use crate::syntax::Style;

/// Writer wrapper for cross-platform terminal output
#[derive(Debug)]
pub struct Surface<W: Write> {
    out: W,
}

impl<W: Write> Surface<W> {
    /// Wrap a writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Move cursor to position
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(self.out, cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Set colors and weight for the following text
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(style.fg.into()),
            SetBackgroundColor(style.bg.into())
        )?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Flush queued commands
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
