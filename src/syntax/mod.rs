//! Syntax highlighting and markdown collaborators
//!
//! Steps with a syntax or markdown focus bypass span resolution and are
//! styled wholesale by one of these collaborators. The traits are the seam;
//! `SyntaxManager` is the built-in implementation of both.

mod builtin;
mod language;
mod manager;
mod markdown;
mod rules;
mod tokens;

pub use language::LanguageDefinition;
pub use manager::SyntaxManager;
pub use rules::{LineState, LineTokens, MultilineRule, PatternRule, Token};
pub use tokens::{Theme, TokenType};

use crate::error::Result;
use crate::focus::SyntaxOptions;
use crate::style::Span;

/// Pre-styled text produced by a collaborator
///
/// `spans` index characters of `text`, which may differ from the input
/// (sliced lines, line-number gutter).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Highlighted {
    pub text: String,
    pub spans: Vec<Span>,
}

/// Styles (a slice of) a buffer as source code
pub trait SyntaxHighlighter {
    fn highlight(&self, code: &str, options: &SyntaxOptions) -> Result<Highlighted>;
}

/// Styles a buffer as structured markup
pub trait MarkdownRenderer {
    fn render_markdown(&self, code: &str) -> Result<Highlighted>;
}
