//! Pattern rules for syntax highlighting
//!
//! A rule pairs a compiled regex with the token its matches are tagged
//! with. Rules carry no priority: the highlighter applies them in the
//! order they were declared.

use regex::Regex;

use super::tokens::TokenType;
use crate::error::{EditorError, Result};

/// A single pattern rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token type to assign to matches
    pub token_type: TokenType,
}

impl PatternRule {
    /// Create a new pattern rule, compiling `pattern`
    pub fn new(name: &str, pattern: &str, token_type: TokenType) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| EditorError::InvalidPattern {
            name: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern: regex,
            token_type,
        })
    }

    /// Iterate over every non-empty match in `text` as byte ranges
    ///
    /// Empty matches are dropped here so callers never see a degenerate span.
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.pattern
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| (m.start(), m.end()))
    }
}
