//! Python language definition

use super::{build, MultilineSpec, PatternSpec};
use crate::error::Result;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::tokens::TokenType;

const MULTILINE: &[MultilineSpec] = &[
    ("triple_double", r#"""""#, r#"""""#, TokenType::String, None),
    ("triple_single", r"'''", r"'''", TokenType::String, None),
    ("double_string", "\"", "\"", TokenType::String, Some('\\')),
    ("single_string", "'", "'", TokenType::String, Some('\\')),
];

const PATTERNS: &[PatternSpec] = &[
    ("comment", r"#.*$", TokenType::Comment, 100),
    ("decorator", r"@[\w.]+", TokenType::Attribute, 95),
    ("string_prefix", r#"\b[fFrRbBuU]{1,2}["']"#, TokenType::Special, 92),
    (
        "keyword",
        r"\b(and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b",
        TokenType::Keyword,
        80,
    ),
    ("constant", r"\b(True|False|None)\b", TokenType::Constant, 79),
    ("self", r"\b(self|cls)\b", TokenType::Special, 77),
    (
        "builtin",
        r"\b(abs|all|any|bool|dict|enumerate|filter|float|getattr|hasattr|int|isinstance|iter|len|list|map|max|min|next|open|print|range|repr|reversed|round|set|sorted|str|sum|super|tuple|type|zip)\b",
        TokenType::Function,
        75,
    ),
    ("hex", r"\b0[xX][0-9a-fA-F_]+\b", TokenType::Number, 65),
    ("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?j?\b", TokenType::Number, 64),
    ("integer", r"\b\d[\d_]*j?\b", TokenType::Number, 63),
    ("operator", r"[+\-*/%&|^!<>=@~]+", TokenType::Operator, 40),
];

/// Create Python language definition
pub fn python_language() -> Result<LanguageDefinition> {
    build("Python", &["py", "pyw", "pyi", "python3"], MULTILINE, PATTERNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::{LineState, Token};

    #[test]
    fn test_python_def_line() {
        let lang = python_language().unwrap();
        let result = lang.highlight_line("def test():  # note", LineState::default());
        assert_eq!(result.tokens[0], Token::new(0, 3, TokenType::Keyword));
        assert_eq!(result.tokens.last(), Some(&Token::new(13, 19, TokenType::Comment)));
    }

    #[test]
    fn test_python_docstring_spans_lines() {
        let lang = python_language().unwrap();
        let open = lang.highlight_line(r#"    """Doc"#, LineState::default());
        assert!(open.end_state.is_inside_multiline());
        let close = lang.highlight_line(r#"more""" + 1"#, open.end_state);
        assert_eq!(close.tokens[0], Token::new(0, 7, TokenType::String));
        assert!(!close.end_state.is_inside_multiline());
    }
}
