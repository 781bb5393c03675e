//! TOML language definition

use super::{build, MultilineSpec, PatternSpec};
use crate::error::Result;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::tokens::TokenType;

const MULTILINE: &[MultilineSpec] = &[
    ("multiline_basic", r#"""""#, r#"""""#, TokenType::String, None),
    ("multiline_literal", r"'''", r"'''", TokenType::String, None),
    ("basic_string", "\"", "\"", TokenType::String, Some('\\')),
    ("literal_string", "'", "'", TokenType::String, None),
];

const PATTERNS: &[PatternSpec] = &[
    ("comment", r"#.*$", TokenType::Comment, 100),
    ("table", r"^\s*\[\[?[^\]]+\]\]?", TokenType::Keyword, 95),
    ("key", r"^\s*[\w\-.]+\s*=", TokenType::Type, 90),
    ("boolean", r"\b(true|false)\b", TokenType::Constant, 80),
    (
        "datetime",
        r"\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)?",
        TokenType::Number,
        75,
    ),
    ("hex", r"\b0x[0-9a-fA-F_]+\b", TokenType::Number, 65),
    ("float", r"[+-]?(?:\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?|\binf\b|\bnan\b)", TokenType::Number, 64),
    ("integer", r"[+-]?\b\d[\d_]*\b", TokenType::Number, 63),
];

/// Create TOML language definition
pub fn toml_language() -> Result<LanguageDefinition> {
    build("TOML", &["toml"], MULTILINE, PATTERNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::{LineState, Token};

    #[test]
    fn test_toml_table_and_key() {
        let lang = toml_language().unwrap();
        let table = lang.highlight_line("[[chapters]]", LineState::default());
        assert_eq!(table.tokens, vec![Token::new(0, 12, TokenType::Keyword)]);

        let pair = lang.highlight_line("title = \"Intro\"", LineState::default());
        assert_eq!(pair.tokens[0], Token::new(0, 7, TokenType::Type));
        assert_eq!(pair.tokens[1], Token::new(8, 15, TokenType::String));
    }
}
