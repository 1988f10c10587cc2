//! LaTeX rule table
//!
//! Order matters: rules are applied first to last and a later rule's
//! color replaces an earlier one on the characters both match. Math
//! delimiters therefore come last so a `$` always shows its own color.
//!
//! Every rule runs in multi-line CRLF mode: `$` ends a line before `\r` or
//! `\n` and `.` matches neither. Command names are ASCII word characters.

use super::rules::PatternRule;
use super::tokens::TokenType;
use crate::error::Result;

/// The built-in LaTeX rules, in application order
pub fn latex_rules() -> Result<Vec<PatternRule>> {
    Ok(vec![
        // \command, \\, \'e, \section*
        PatternRule::new("command", r"(?mR)(\\)((?-u:\w)+|['`\\](?-u:\w)*)(\*)*", TokenType::Command)?,
        // Greedy: the first { to the last } of a line
        PatternRule::new("group", r"(?mR)(\{).+(\})", TokenType::Group)?,
        PatternRule::new("optional_argument", r"(?mR)(\[).+(\])", TokenType::OptionalArgument)?,
        PatternRule::new("comment", r"(?mR)(%).*$", TokenType::Comment)?,
        // May span lines
        PatternRule::new("inline_math", r"(?mR)\$([^$]*)\$", TokenType::Math)?,
        PatternRule::new("math_delimiter", r"(?mR)\$", TokenType::MathDelimiter)?,
    ])
}
