//! Pattern rules for syntax highlighting
//!
//! Rules classify text into token types. Single-line rules match within a
//! line; multi-line rules open on one line and may close on a later one,
//! carried across lines by `LineState`.

use regex::Regex;

use super::tokens::TokenType;
use crate::error::{FocusError, Result};

/// A single-line pattern rule
///
/// Rules are tried in priority order (highest first) when several match at
/// the same position.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Name for debugging
    pub name: &'static str,
    pub pattern: Regex,
    pub token_type: TokenType,
    /// Priority (higher = preferred)
    pub priority: i32,
}

impl PatternRule {
    /// Compile a pattern rule
    pub fn new(name: &'static str, pattern: &str, token_type: TokenType, priority: i32) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| FocusError::pattern(pattern, e))?;
        Ok(Self {
            name,
            pattern,
            token_type,
            priority,
        })
    }

    /// Find the first match at or after `start`, as byte offsets
    ///
    /// Searches the whole line so anchors and word boundaries see the
    /// surrounding text.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start >= text.len() {
            return None;
        }
        self.pattern
            .find_at(text, start)
            .filter(|m| !m.is_empty())
            .map(|m| (m.start(), m.end()))
    }
}

/// A construct that may span lines (block comments, strings)
#[derive(Debug, Clone)]
pub struct MultilineRule {
    /// Name for debugging
    pub name: &'static str,
    /// Pattern that opens the construct
    pub start: Regex,
    /// Pattern that closes the construct
    pub end: Regex,
    pub token_type: TokenType,
    /// Escape character that suppresses a closing match (usually backslash)
    pub escape_char: Option<char>,
    /// Unique ID for this multiline state (1-255, 0 = normal)
    pub state_id: u8,
}

impl MultilineRule {
    /// Compile a multi-line rule
    pub fn new(
        name: &'static str,
        start_pattern: &str,
        end_pattern: &str,
        token_type: TokenType,
        state_id: u8,
    ) -> Result<Self> {
        let start = Regex::new(start_pattern).map_err(|e| FocusError::pattern(start_pattern, e))?;
        let end = Regex::new(end_pattern).map_err(|e| FocusError::pattern(end_pattern, e))?;
        Ok(Self {
            name,
            start,
            end,
            token_type,
            escape_char: None,
            state_id,
        })
    }

    /// Builder: let `escape_char` suppress a closing match
    pub fn escaped_by(mut self, escape_char: char) -> Self {
        self.escape_char = Some(escape_char);
        self
    }

    /// Find where this construct opens, at or after `start`
    pub fn find_start(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start >= text.len() {
            return None;
        }
        self.start
            .find_at(text, start)
            .filter(|m| !m.is_empty())
            .map(|m| (m.start(), m.end()))
    }

    /// Find the byte offset just past the closing pattern, respecting escapes
    pub fn find_end(&self, text: &str, start: usize) -> Option<usize> {
        let mut pos = start;
        while pos <= text.len() {
            let m = self.end.find_at(text, pos)?;
            if let Some(escape) = self.escape_char {
                let escapes = text[start..m.start()]
                    .chars()
                    .rev()
                    .take_while(|&c| c == escape)
                    .count();
                if escapes % 2 == 1 {
                    // Odd number of escapes: this delimiter is literal text
                    pos = m.end().max(pos + 1);
                    continue;
                }
            }
            return Some(m.end());
        }
        None
    }
}

/// Highlighter state carried from one line to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineState {
    /// 0 = normal, non-zero = inside multiline rule with this ID
    pub multiline_id: u8,
}

impl LineState {
    /// Create state for being inside a multiline construct
    pub fn inside(state_id: u8) -> Self {
        Self {
            multiline_id: state_id,
        }
    }

    /// Check if we're inside a multiline construct
    pub fn is_inside_multiline(&self) -> bool {
        self.multiline_id != 0
    }
}

/// A classified run of text within one line, in byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub token_type: TokenType,
}

impl Token {
    pub fn new(start: usize, end: usize, token_type: TokenType) -> Self {
        Self {
            start,
            end,
            token_type,
        }
    }
}

/// Tokens of one line and the state handed to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens {
    pub tokens: Vec<Token>,
    pub end_state: LineState,
}
