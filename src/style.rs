//! Style types for highlighted text
//!
//! A `Style` is a plain value: two styles with the same attributes are the
//! same style. Spans carry a style over a half-open range of character
//! offsets into the buffer.

use crate::error::{FocusError, Result};

/// Foreground colors (ANSI 16-color palette plus 24-bit RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color name (`red`, `bright_blue`, `grey`) or `#rrggbb` hex value
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| FocusError::InvalidColor(s.to_string()));
        }

        let name: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        let color = match name.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "brightblack" | "grey" | "gray" => Color::BrightBlack,
            "brightred" => Color::BrightRed,
            "brightgreen" => Color::BrightGreen,
            "brightyellow" => Color::BrightYellow,
            "brightblue" => Color::BrightBlue,
            "brightmagenta" => Color::BrightMagenta,
            "brightcyan" => Color::BrightCyan,
            "brightwhite" => Color::BrightWhite,
            _ => return Err(FocusError::InvalidColor(s.to_string())),
        };
        Ok(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color, `None` keeps the terminal default
    pub color: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    /// Low-intensity text
    pub dim: bool,
}

impl Style {
    /// Create a style with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    /// The muted style used for uncovered background text
    pub fn dimmed() -> Self {
        Self {
            dim: true,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set strike-through
    pub fn with_strike(mut self) -> Self {
        self.strike = true;
        self
    }

    /// Builder: set dim
    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Paint `top` over this style: set attributes and colors of `top` win
    pub fn overlay(self, top: Style) -> Style {
        Style {
            color: top.color.or(self.color),
            bold: self.bold || top.bold,
            italic: self.italic || top.italic,
            underline: self.underline || top.underline,
            strike: self.strike || top.strike,
            dim: self.dim || top.dim,
        }
    }

    /// Parse a space-separated style description such as `"bold yellow"`
    ///
    /// Words are attribute names (`bold`, `italic`, `underline`, `strike`,
    /// `dim`) or a single color. `"none"` and the empty string give the
    /// default style.
    pub fn parse(s: &str) -> Result<Self> {
        let mut style = Style::default();
        for word in s.split_whitespace() {
            match word.to_lowercase().as_str() {
                "none" | "default" => {}
                "bold" | "b" => style.bold = true,
                "italic" | "i" => style.italic = true,
                "underline" | "u" => style.underline = true,
                "strike" | "s" => style.strike = true,
                "dim" | "d" => style.dim = true,
                _ => {
                    let color = Color::parse(word)
                        .map_err(|_| FocusError::InvalidStyle(s.to_string()))?;
                    if style.color.is_some() {
                        return Err(FocusError::InvalidStyle(s.to_string()));
                    }
                    style.color = Some(color);
                }
            }
        }
        Ok(style)
    }
}

/// A styled span of text in character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Character offset where this span starts (inclusive)
    pub start: usize,
    /// Character offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a character position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Check if `other` lies entirely inside this span (bounds may touch)
    pub fn contains_span(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Get the length of this span in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
