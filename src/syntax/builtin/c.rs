//! C/C++ language definition

use super::{build, MultilineSpec, PatternSpec};
use crate::error::Result;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::tokens::TokenType;

const MULTILINE: &[MultilineSpec] = &[
    ("block_comment", r"/\*", r"\*/", TokenType::Comment, None),
    ("string", "\"", "\"", TokenType::String, Some('\\')),
];

const PATTERNS: &[PatternSpec] = &[
    ("line_comment", r"//.*$", TokenType::Comment, 100),
    ("preprocessor", r"^\s*#\s*\w+", TokenType::Preprocessor, 95),
    ("char", r"'(?:[^'\\]|\\.)'", TokenType::Char, 90),
    (
        "keyword",
        r"\b(auto|break|case|char|const|continue|default|do|double|else|enum|extern|float|for|goto|if|inline|int|long|register|restrict|return|short|signed|sizeof|static|struct|switch|typedef|union|unsigned|void|volatile|while)\b",
        TokenType::Keyword,
        80,
    ),
    (
        "cpp_keyword",
        r"\b(bool|catch|class|constexpr|const_cast|decltype|delete|dynamic_cast|explicit|friend|mutable|namespace|new|noexcept|nullptr|operator|private|protected|public|reinterpret_cast|static_assert|static_cast|template|this|throw|try|typename|using|virtual)\b",
        TokenType::Keyword,
        79,
    ),
    ("boolean", r"\b(true|false|NULL)\b", TokenType::Constant, 78),
    (
        "type",
        r"\b(size_t|ptrdiff_t|intptr_t|uintptr_t|u?int(?:8|16|32|64)_t|FILE)\b",
        TokenType::Type,
        75,
    ),
    ("hex", r"\b0[xX][0-9a-fA-F]+[uUlL]*\b", TokenType::Number, 65),
    ("float", r"\b\d+\.\d*(?:[eE][+-]?\d+)?[fFlL]?", TokenType::Number, 64),
    ("integer", r"\b\d+[uUlL]*\b", TokenType::Number, 63),
    ("operator", r"[+\-*/%&|^!<>=~?:]+", TokenType::Operator, 40),
];

/// Create C language definition (also used for C++)
pub fn c_language() -> Result<LanguageDefinition> {
    build("C", &["h", "cpp", "c++", "hpp", "cc", "cxx"], MULTILINE, PATTERNS)
}
