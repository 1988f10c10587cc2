//! LaTeX source editor core
//!
//! Regex syntax highlighting over a spanned text buffer and a line number
//! gutter that skips soft-wrapped rows. The host display owns the text and
//! the layout; [`EditorView`] is a ready-made host drawing to a terminal.

pub mod buffer;
pub mod config;
pub mod display;
pub mod editor;
pub mod error;
pub mod gutter;
pub mod layout;
pub mod settings;
pub mod syntax;
pub mod terminal;

pub use buffer::{SpannedText, TextBuffer};
pub use config::{EditorConfig, Preferences};
pub use editor::EditorView;
pub use error::{EditorError, Result};
pub use gutter::{render_line_numbers, GutterMetrics, LineNumber, LineNumbers};
pub use layout::{LineLayout, WrappedLayout};
pub use settings::{PreferenceKey, SettingsPanel};
pub use syntax::{Highlighter, PatternRule, StyleSpan, TokenType};
