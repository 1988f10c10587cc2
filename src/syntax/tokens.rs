//! Token types for LaTeX highlighting
//!
//! Each token type is the color identifier a highlight rule tags its
//! matches with. The default palette mirrors the editor's resource colors.

use super::style::{Color, Style};

/// Semantic token types recognized in LaTeX source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Control sequences (`\section`, `\\`, `\'e`)
    Command,
    /// Brace groups (`{...}`)
    Group,
    /// Bracketed optional arguments (`[...]`)
    OptionalArgument,
    /// `%` comments up to end of line
    Comment,
    /// Inline math (`$...$`)
    Math,
    /// A lone math shift (`$`)
    MathDelimiter,
}

impl TokenType {
    /// Every token type, in declaration order
    pub const ALL: [TokenType; 6] = [
        TokenType::Command,
        TokenType::Group,
        TokenType::OptionalArgument,
        TokenType::Comment,
        TokenType::Math,
        TokenType::MathDelimiter,
    ];

    /// Get the default style for this token type
    pub fn default_style(&self) -> Style {
        match self {
            TokenType::Command => Style::fg(Color::Rgb(0x21, 0x96, 0xf3)).with_bold(),
            TokenType::Group => Style::fg(Color::Rgb(0xe9, 0x1e, 0x63)),
            TokenType::OptionalArgument => Style::fg(Color::Rgb(0xff, 0x98, 0x00)),
            TokenType::Comment => Style::fg(Color::Rgb(0x9e, 0x9e, 0x9e)),
            TokenType::Math => Style::fg(Color::Rgb(0x38, 0x8e, 0x3c)),
            TokenType::MathDelimiter => Style::fg(Color::Rgb(0x8b, 0xc3, 0x4a)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles_not_empty() {
        for token_type in TokenType::ALL {
            assert!(!token_type.default_style().is_default());
        }
    }

    #[test]
    fn test_all_in_declaration_order() {
        for (index, token_type) in TokenType::ALL.into_iter().enumerate() {
            assert_eq!(token_type as usize, index);
        }
    }
}
