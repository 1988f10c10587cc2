//! Syntax and styling module
//!
//! This module provides the LaTeX highlighting infrastructure:
//! - Colors, styles and styled spans
//! - Ordered regex rules and the built-in LaTeX table
//! - The range highlighter

mod style;
mod tokens;
mod rules;
mod latex;
mod highlighter;

pub use style::{Color, Style, StyleSpan};
pub use tokens::TokenType;
pub use rules::PatternRule;
pub use latex::latex_rules;
pub use highlighter::Highlighter;
