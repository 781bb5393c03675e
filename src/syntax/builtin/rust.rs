//! Rust language definition

use super::{build, MultilineSpec, PatternSpec};
use crate::error::Result;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::tokens::TokenType;

const MULTILINE: &[MultilineSpec] = &[
    ("block_comment", r"/\*", r"\*/", TokenType::Comment, None),
    ("raw_string", r##"r#""##, r##""#"##, TokenType::String, None),
    ("string", "\"", "\"", TokenType::String, Some('\\')),
];

const PATTERNS: &[PatternSpec] = &[
    ("doc_comment", r"///.*$", TokenType::Comment, 101),
    ("line_comment", r"//.*$", TokenType::Comment, 100),
    ("attribute", r"#!?\[[^\]]*\]", TokenType::Attribute, 95),
    ("char", r"'(?:[^'\\]|\\.)'", TokenType::Char, 90),
    ("lifetime", r"'\w+", TokenType::Lifetime, 89),
    ("macro", r"\b\w+!", TokenType::Macro, 85),
    (
        "keyword",
        r"\b(as|async|await|break|const|continue|crate|dyn|else|enum|extern|fn|for|if|impl|in|let|loop|match|mod|move|mut|pub|ref|return|self|Self|static|struct|super|trait|type|union|unsafe|use|where|while)\b",
        TokenType::Keyword,
        80,
    ),
    ("boolean", r"\b(true|false)\b", TokenType::Constant, 78),
    (
        "primitive",
        r"\b(bool|char|str|u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize|f32|f64)\b",
        TokenType::Type,
        75,
    ),
    ("type_name", r"\b[A-Z][a-zA-Z0-9_]*\b", TokenType::Type, 60),
    ("hex", r"\b0x[0-9a-fA-F_]+\b", TokenType::Number, 65),
    ("binary", r"\b0b[01_]+\b", TokenType::Number, 65),
    ("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?\b", TokenType::Number, 64),
    ("integer", r"\b\d[\d_]*(?:[ui](?:8|16|32|64|128|size))?\b", TokenType::Number, 63),
    ("operator", r"[+\-*/%&|^!<>=@]+", TokenType::Operator, 40),
];

/// Create Rust language definition
pub fn rust_language() -> Result<LanguageDefinition> {
    build("Rust", &["rs"], MULTILINE, PATTERNS)
}
