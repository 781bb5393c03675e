//! Focus rules
//!
//! A `Focus` describes one match rule and the style applied to what it
//! matches. Patterns are compiled when the focus is built, so a bad regular
//! expression is reported before anything is rendered.

mod defaults;

pub use defaults::FocusDefaults;

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::{FocusError, Result};
use crate::style::Style;

/// Characters that mark a `Between` delimiter as a regular expression
const REGEX_METACHARACTERS: &str = ".^$*+?{}[]\\|()";

/// Selects which occurrences of a multi-match focus are kept
///
/// Indices are 0-based, in the order the search discovers matches.
/// Indices past the last match select nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchIndex {
    #[default]
    All,
    One(usize),
    Many(Vec<usize>),
}

impl MatchIndex {
    /// Check whether the `n`th discovered occurrence is selected
    pub fn selects(&self, n: usize) -> bool {
        match self {
            MatchIndex::All => true,
            MatchIndex::One(i) => *i == n,
            MatchIndex::Many(indices) => indices.contains(&n),
        }
    }

    /// Keep only the selected items, preserving discovery order
    pub fn filter<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .enumerate()
            .filter(|(n, _)| self.selects(*n))
            .map(|(_, item)| item)
            .collect()
    }
}

impl From<usize> for MatchIndex {
    fn from(index: usize) -> Self {
        MatchIndex::One(index)
    }
}

impl From<Vec<usize>> for MatchIndex {
    fn from(indices: Vec<usize>) -> Self {
        MatchIndex::Many(indices)
    }
}

impl From<Option<usize>> for MatchIndex {
    fn from(index: Option<usize>) -> Self {
        index.map_or(MatchIndex::All, MatchIndex::One)
    }
}

/// Options for a `Between` focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetweenOptions {
    /// Include the delimiters in the span
    pub inclusive: bool,
    /// Let the body span line breaks
    pub multiline: bool,
    /// Longest body instead of shortest
    pub greedy: bool,
}

impl Default for BetweenOptions {
    fn default() -> Self {
        Self {
            inclusive: true,
            multiline: true,
            greedy: false,
        }
    }
}

/// Whole lines of context around a matched line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextWindow {
    pub before: usize,
    pub after: usize,
}

impl ContextWindow {
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }
}

/// Options handed to the syntax highlighting collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxOptions {
    /// Lexer name or file extension (`python`, `rs`)
    pub lexer: String,
    /// Theme name, `None` for the highlighter's default
    pub theme: Option<String>,
    pub line_numbers: bool,
    /// First line of the slice (0-based, inclusive)
    pub start_line: Option<usize>,
    /// End of the slice (0-based, exclusive)
    pub end_line: Option<usize>,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        Self {
            lexer: "python".to_string(),
            theme: None,
            line_numbers: false,
            start_line: None,
            end_line: None,
        }
    }
}

impl SyntaxOptions {
    pub fn new(lexer: &str) -> Self {
        Self {
            lexer: lexer.to_string(),
            ..Default::default()
        }
    }
}

/// A single match-and-style rule
#[derive(Debug, Clone)]
pub enum Focus {
    /// Exact substring, optionally only as a whole word
    Literal {
        text: String,
        word_boundary: bool,
        pattern: Regex,
        match_index: MatchIndex,
        style: Style,
    },
    /// Every match of a regular expression
    Regex {
        pattern: Regex,
        match_index: MatchIndex,
        style: Style,
    },
    /// One line (0-based), without its newline
    Line { line_number: usize, style: Style },
    /// Explicit character range, validated when rendered
    Range { start: usize, end: usize, style: Style },
    /// From `text` to the end of its line
    StartsWith {
        text: String,
        from_start_of_line: bool,
        style: Style,
    },
    /// Text framed by two delimiters
    Between {
        start_pattern: String,
        end_pattern: String,
        pattern: Regex,
        options: BetweenOptions,
        match_index: MatchIndex,
        style: Style,
    },
    /// Lines containing a substring plus surrounding context
    LineContaining {
        pattern: String,
        window: ContextWindow,
        match_index: MatchIndex,
        style: Style,
    },
    /// Lines matching a regular expression plus surrounding context
    LineContainingRegex {
        pattern: Regex,
        window: ContextWindow,
        match_index: MatchIndex,
        style: Style,
    },
    /// Hand the whole step to the syntax highlighter
    Syntax(SyntaxOptions),
    /// Hand the whole step to the markdown renderer
    Markdown,
}

impl Focus {
    /// Focus on every occurrence of `text`
    pub fn literal(text: &str, style: Style) -> Result<Self> {
        Self::build_literal(text, false, style)
    }

    /// Focus on `text` only where it stands as a whole word
    pub fn literal_word(text: &str, style: Style) -> Result<Self> {
        Self::build_literal(text, true, style)
    }

    fn build_literal(text: &str, word_boundary: bool, style: Style) -> Result<Self> {
        let escaped = regex::escape(text);
        let source = if word_boundary {
            format!(r"\b{}\b", escaped)
        } else {
            escaped
        };
        let pattern = Regex::new(&source).map_err(|e| FocusError::pattern(text, e))?;
        Ok(Focus::Literal {
            text: text.to_string(),
            word_boundary,
            pattern,
            match_index: MatchIndex::All,
            style,
        })
    }

    /// Focus on every match of a regular expression
    pub fn regex(pattern: &str, style: Style) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| FocusError::pattern(pattern, e))?;
        Ok(Focus::Regex {
            pattern,
            match_index: MatchIndex::All,
            style,
        })
    }

    /// Focus on a 0-based line
    pub fn line(line_number: usize, style: Style) -> Self {
        Focus::Line { line_number, style }
    }

    /// Focus on an explicit character range
    pub fn range(start: usize, end: usize, style: Style) -> Self {
        Focus::Range { start, end, style }
    }

    /// Focus from each occurrence of `text` to the end of its line
    ///
    /// With `from_start_of_line`, only lines whose content (ignoring
    /// indentation) begins with `text` are matched.
    pub fn starts_with(text: &str, from_start_of_line: bool, style: Style) -> Self {
        Focus::StartsWith {
            text: text.to_string(),
            from_start_of_line,
            style,
        }
    }

    /// Focus on text between two delimiters
    ///
    /// Delimiters are taken literally unless they contain a regex
    /// metacharacter, in which case they are used as patterns.
    pub fn between(
        start_pattern: &str,
        end_pattern: &str,
        options: BetweenOptions,
        style: Style,
    ) -> Result<Self> {
        let body = if options.greedy { ".*" } else { ".*?" };
        let source = format!(
            "(?:{})(?P<body>{})(?:{})",
            delimiter(start_pattern),
            body,
            delimiter(end_pattern)
        );
        let pattern = RegexBuilder::new(&source)
            .multi_line(options.multiline)
            .dot_matches_new_line(options.multiline)
            .build()
            .map_err(|e| FocusError::pattern(&format!("{} .. {}", start_pattern, end_pattern), e))?;
        Ok(Focus::Between {
            start_pattern: start_pattern.to_string(),
            end_pattern: end_pattern.to_string(),
            pattern,
            options,
            match_index: MatchIndex::All,
            style,
        })
    }

    /// Focus on whole lines containing `pattern`, plus context lines
    pub fn line_containing(pattern: &str, window: ContextWindow, style: Style) -> Self {
        Focus::LineContaining {
            pattern: pattern.to_string(),
            window,
            match_index: MatchIndex::All,
            style,
        }
    }

    /// Focus on whole lines matching a regular expression, plus context lines
    pub fn line_containing_regex(pattern: &str, window: ContextWindow, style: Style) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| FocusError::pattern(pattern, e))?;
        Ok(Focus::LineContainingRegex {
            pattern,
            window,
            match_index: MatchIndex::All,
            style,
        })
    }

    /// Delegate the step to the syntax highlighter
    pub fn syntax(options: SyntaxOptions) -> Self {
        Focus::Syntax(options)
    }

    /// Delegate the step to the markdown renderer
    pub fn markdown() -> Self {
        Focus::Markdown
    }

    /// Restrict a multi-match focus to the selected occurrences
    ///
    /// Every multi-match kind takes any `MatchIndex`, including a list of
    /// occurrences for `Between` and the line-containing kinds. Tutorial
    /// files still give those kinds a single index. Focus kinds without
    /// occurrences are returned unchanged.
    pub fn with_match_index(mut self, index: impl Into<MatchIndex>) -> Self {
        match &mut self {
            Focus::Literal { match_index, .. }
            | Focus::Regex { match_index, .. }
            | Focus::Between { match_index, .. }
            | Focus::LineContaining { match_index, .. }
            | Focus::LineContainingRegex { match_index, .. } => *match_index = index.into(),
            Focus::Line { .. }
            | Focus::Range { .. }
            | Focus::StartsWith { .. }
            | Focus::Syntax(_)
            | Focus::Markdown => {}
        }
        self
    }

    /// Style applied to this focus' matches, `None` for delegating kinds
    pub fn style(&self) -> Option<Style> {
        match self {
            Focus::Literal { style, .. }
            | Focus::Regex { style, .. }
            | Focus::Line { style, .. }
            | Focus::Range { style, .. }
            | Focus::StartsWith { style, .. }
            | Focus::Between { style, .. }
            | Focus::LineContaining { style, .. }
            | Focus::LineContainingRegex { style, .. } => Some(*style),
            Focus::Syntax(_) | Focus::Markdown => None,
        }
    }

    /// Check whether this focus replaces span compositing for its step
    pub fn is_delegating(&self) -> bool {
        matches!(self, Focus::Syntax(_) | Focus::Markdown)
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Focus::Literal { text, word_boundary, .. } => {
                write!(f, "literal {:?}", text)?;
                if *word_boundary {
                    write!(f, " (whole word)")?;
                }
                Ok(())
            }
            Focus::Regex { pattern, .. } => write!(f, "regex /{}/", pattern),
            Focus::Line { line_number, .. } => write!(f, "line {}", line_number),
            Focus::Range { start, end, .. } => write!(f, "range {}..{}", start, end),
            Focus::StartsWith { text, .. } => write!(f, "starts with {:?}", text),
            Focus::Between {
                start_pattern,
                end_pattern,
                ..
            } => write!(f, "between {:?} and {:?}", start_pattern, end_pattern),
            Focus::LineContaining { pattern, .. } => write!(f, "lines containing {:?}", pattern),
            Focus::LineContainingRegex { pattern, .. } => write!(f, "lines matching /{}/", pattern),
            Focus::Syntax(options) => write!(f, "syntax ({})", options.lexer),
            Focus::Markdown => write!(f, "markdown"),
        }
    }
}

fn delimiter(pattern: &str) -> String {
    if pattern.chars().any(|c| REGEX_METACHARACTERS.contains(c)) {
        pattern.to_string()
    } else {
        regex::escape(pattern)
    }
}

/// An ordered list of focuses, validated for one step
#[derive(Debug, Clone, Default)]
pub struct FocusList {
    focuses: Vec<Focus>,
}

impl FocusList {
    /// Validate a focus list
    ///
    /// At most one syntax and one markdown focus may appear.
    pub fn new(focuses: Vec<Focus>) -> Result<Self> {
        let markdown = focuses.iter().filter(|f| matches!(f, Focus::Markdown)).count();
        if markdown > 1 {
            return Err(FocusError::DuplicateMarkdown);
        }
        let syntax = focuses.iter().filter(|f| matches!(f, Focus::Syntax(_))).count();
        if syntax > 1 {
            return Err(FocusError::DuplicateSyntax);
        }
        Ok(Self { focuses })
    }

    /// The syntax focus options, if present
    pub fn syntax(&self) -> Option<&SyntaxOptions> {
        self.focuses.iter().find_map(|f| match f {
            Focus::Syntax(options) => Some(options),
            _ => None,
        })
    }

    /// Check for a markdown focus
    pub fn markdown(&self) -> bool {
        self.focuses.iter().any(|f| matches!(f, Focus::Markdown))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Focus> {
        self.focuses.iter()
    }

    pub fn len(&self) -> usize {
        self.focuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.focuses.is_empty()
    }
}

/// A caption paired with the focuses shown while it is on screen
#[derive(Debug, Clone, Default)]
pub struct Step {
    pub description: String,
    pub focuses: FocusList,
}

impl Step {
    pub fn new(description: &str, focuses: Vec<Focus>) -> Result<Self> {
        Ok(Self {
            description: description.to_string(),
            focuses: FocusList::new(focuses)?,
        })
    }
}
