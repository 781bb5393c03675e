//! Token types and highlight themes
//!
//! Language rules classify text into `TokenType`s; a `Theme` decides how
//! each token type looks.

use crate::style::{Color, Style};

/// Semantic token types for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Comments (`//`, `#`, `/* */`)
    Comment,
    /// String literals
    String,
    /// Character literals
    Char,
    /// Numeric literals
    Number,
    /// Language keywords
    Keyword,
    /// Type names
    Type,
    /// Function names and builtins
    Function,
    /// Operators
    Operator,
    /// Preprocessor directives
    Preprocessor,
    /// Macros (`println!`)
    Macro,
    /// Constants and booleans
    Constant,
    /// Escapes, prefixes, `self`
    Special,
    /// Attributes and decorators
    Attribute,
    /// Lifetime annotations
    Lifetime,
    /// Markup headings
    Heading,
    /// Markup emphasis
    Emphasis,
    /// Markup links and images
    Link,
}

/// A named mapping from token types to styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// 16-color palette
    #[default]
    Default,
    /// Attributes only, no colors
    Monochrome,
}

impl Theme {
    /// Look up a theme by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "ansi" => Some(Theme::Default),
            "monochrome" | "mono" | "bw" => Some(Theme::Monochrome),
            _ => None,
        }
    }

    /// Style for a token type
    pub fn style(&self, token: TokenType) -> Style {
        match self {
            Theme::Default => default_style(token),
            Theme::Monochrome => monochrome_style(token),
        }
    }

    /// Style for the line number gutter
    pub fn gutter(&self) -> Style {
        match self {
            Theme::Default => Style::fg(Color::BrightBlack),
            Theme::Monochrome => Style::dimmed(),
        }
    }
}

fn default_style(token: TokenType) -> Style {
    match token {
        TokenType::Comment => Style::fg(Color::BrightBlack).with_italic(),
        TokenType::String | TokenType::Char => Style::fg(Color::Green),
        TokenType::Number => Style::fg(Color::Cyan),
        TokenType::Keyword => Style::fg(Color::Magenta).with_bold(),
        TokenType::Type => Style::fg(Color::Yellow),
        TokenType::Function => Style::fg(Color::Blue),
        TokenType::Operator => Style::fg(Color::BrightWhite),
        TokenType::Preprocessor | TokenType::Lifetime => Style::fg(Color::BrightMagenta),
        TokenType::Macro => Style::fg(Color::BrightCyan),
        TokenType::Constant => Style::fg(Color::BrightRed),
        TokenType::Special => Style::fg(Color::BrightYellow),
        TokenType::Attribute => Style::fg(Color::BrightBlue),
        TokenType::Heading => Style::fg(Color::BrightMagenta).with_bold(),
        TokenType::Emphasis => Style::default().with_italic(),
        TokenType::Link => Style::fg(Color::Blue).with_underline(),
    }
}

fn monochrome_style(token: TokenType) -> Style {
    match token {
        TokenType::Comment => Style::dimmed().with_italic(),
        TokenType::Keyword | TokenType::Heading => Style::default().with_bold(),
        TokenType::Emphasis => Style::default().with_italic(),
        TokenType::Link => Style::default().with_underline(),
        TokenType::String | TokenType::Char => Style::default().with_italic(),
        _ => Style::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles_not_empty() {
        let theme = Theme::Default;
        assert!(!theme.style(TokenType::Comment).is_default());
        assert!(!theme.style(TokenType::String).is_default());
        assert!(!theme.style(TokenType::Keyword).is_default());
    }

    #[test]
    fn test_monochrome_has_no_colors() {
        let theme = Theme::Monochrome;
        for token in [TokenType::Comment, TokenType::Keyword, TokenType::Number, TokenType::Link] {
            assert_eq!(theme.style(token).color, None);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("Default"), Some(Theme::Default));
        assert_eq!(Theme::from_name("mono"), Some(Theme::Monochrome));
        assert_eq!(Theme::from_name("solarized"), None);
    }
}
