//! Markdown language definition
//!
//! Also backs the built-in markdown renderer.

use super::{build, MultilineSpec, PatternSpec};
use crate::error::Result;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::tokens::TokenType;

const MULTILINE: &[MultilineSpec] = &[("code_block", r"^\s*```", r"^\s*```", TokenType::String, None)];

const PATTERNS: &[PatternSpec] = &[
    ("heading", r"^#{1,6}\s+.*$", TokenType::Heading, 100),
    ("inline_code", r"`[^`]+`", TokenType::String, 88),
    ("bold", r"\*\*[^*]+\*\*|__[^_]+__", TokenType::Keyword, 90),
    ("italic", r"\*[^*\s][^*]*\*|\b_[^_]+_\b", TokenType::Emphasis, 85),
    ("image", r"!\[[^\]]*\]\([^)]+\)", TokenType::Link, 81),
    ("link", r"\[[^\]]+\]\([^)]+\)", TokenType::Link, 80),
    ("blockquote", r"^>\s?.*$", TokenType::Comment, 75),
    ("hr", r"^(?:---+|\*\*\*+|___+)\s*$", TokenType::Operator, 70),
    ("list", r"^\s*(?:[-*+]|\d+\.)\s", TokenType::Operator, 65),
    ("strikethrough", r"~~[^~]+~~", TokenType::Comment, 60),
];

/// Create Markdown language definition
pub fn markdown_language() -> Result<LanguageDefinition> {
    build("Markdown", &["md", "markdown", "mkd"], MULTILINE, PATTERNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::{LineState, Token};

    #[test]
    fn test_heading() {
        let lang = markdown_language().unwrap();
        let result = lang.highlight_line("## Title", LineState::default());
        assert_eq!(result.tokens, vec![Token::new(0, 8, TokenType::Heading)]);
    }

    #[test]
    fn test_inline_markup() {
        let lang = markdown_language().unwrap();
        let result = lang.highlight_line("- a **b** `c`", LineState::default());
        assert_eq!(
            result.tokens,
            vec![
                Token::new(0, 2, TokenType::Operator),
                Token::new(4, 9, TokenType::Keyword),
                Token::new(10, 13, TokenType::String),
            ]
        );
    }

    #[test]
    fn test_fenced_code_block() {
        let lang = markdown_language().unwrap();
        let open = lang.highlight_line("```rust", LineState::default());
        assert!(open.end_state.is_inside_multiline());
        let body = lang.highlight_line("let x = 1;", open.end_state);
        assert_eq!(body.tokens, vec![Token::new(0, 10, TokenType::String)]);
        let close = lang.highlight_line("```", body.end_state);
        assert!(!close.end_state.is_inside_multiline());
    }
}
