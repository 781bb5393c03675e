//! Built-in syntax highlighter and markdown renderer
//!
//! `SyntaxManager` resolves a lexer name to a language, tokenizes the
//! requested slice of the buffer line by line and maps tokens through a
//! theme into pre-styled output.

use std::collections::HashMap;

use log::{debug, warn};

use super::builtin;
use super::markdown;
use super::language::LanguageDefinition;
use super::rules::LineState;
use super::tokens::Theme;
use super::{Highlighted, MarkdownRenderer, SyntaxHighlighter};
use crate::error::Result;
use crate::focus::SyntaxOptions;
use crate::style::Span;

/// Main syntax highlighting manager
pub struct SyntaxManager {
    /// Loaded language definitions
    languages: Vec<LanguageDefinition>,
    /// Lower-cased name, alias or extension to language index
    lookup: HashMap<String, usize>,
}

impl SyntaxManager {
    /// Create a new syntax manager with built-in languages
    pub fn new() -> Result<Self> {
        let mut manager = Self {
            languages: Vec::new(),
            lookup: HashMap::new(),
        };
        for lang in builtin::all_languages()? {
            manager.add_language(lang);
        }
        Ok(manager)
    }

    /// Add a language definition, replacing earlier aliases it shares
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        let index = self.languages.len();
        for alias in &lang.aliases {
            self.lookup.insert(alias.clone(), index);
        }
        self.languages.push(lang);
    }

    /// Find a language by lexer name or file extension
    pub fn language(&self, lexer: &str) -> Option<&LanguageDefinition> {
        let key = lexer.trim().trim_start_matches('.').to_lowercase();
        self.lookup.get(&key).map(|&index| &self.languages[index])
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.iter().map(|l| l.name.as_str()).collect();
        names.sort();
        names
    }

    /// Tokenize `code` and lay it out with optional line numbers
    fn render(
        &self,
        code: &str,
        lang: Option<&LanguageDefinition>,
        theme: Theme,
        first_line_number: Option<usize>,
    ) -> Highlighted {
        let lines: Vec<&str> = code.split('\n').collect();
        let number_width = first_line_number
            .map(|first| (first + lines.len() - 1).to_string().len())
            .unwrap_or(0);

        let mut text = String::with_capacity(code.len());
        let mut spans = Vec::new();
        let mut chars = 0;
        let mut state = LineState::default();

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
                chars += 1;
            }

            if let Some(first) = first_line_number {
                let gutter = format!("{:>width$} ", first + i, width = number_width);
                let gutter_chars = gutter.chars().count();
                spans.push(Span::new(chars, chars + gutter_chars - 1, theme.gutter()));
                text.push_str(&gutter);
                chars += gutter_chars;
            }

            if let Some(lang) = lang {
                let result = lang.highlight_line(line, state);
                state = result.end_state;
                for token in result.tokens {
                    let start = chars + line[..token.start].chars().count();
                    let end = chars + line[..token.end].chars().count();
                    if start < end {
                        spans.push(Span::new(start, end, theme.style(token.token_type)));
                    }
                }
            }

            text.push_str(line);
            chars += line.chars().count();
        }

        Highlighted { text, spans }
    }
}

impl SyntaxHighlighter for SyntaxManager {
    fn highlight(&self, code: &str, options: &SyntaxOptions) -> Result<Highlighted> {
        let (slice, first_line) = slice_lines(code, options.start_line, options.end_line);

        let lang = self.language(&options.lexer);
        if lang.is_none() {
            warn!("unknown lexer `{}`, showing plain text", options.lexer);
        }

        let theme = match options.theme.as_deref() {
            None => Theme::default(),
            Some(name) => Theme::from_name(name).unwrap_or_else(|| {
                warn!("unknown theme `{}`, using default", name);
                Theme::default()
            }),
        };

        debug!(
            "highlighting {} bytes as {}",
            slice.len(),
            lang.map_or("plain text", |l| l.name.as_str())
        );
        let numbers = options.line_numbers.then_some(first_line + 1);
        Ok(self.render(&slice, lang, theme, numbers))
    }
}

impl MarkdownRenderer for SyntaxManager {
    fn render_markdown(&self, code: &str) -> Result<Highlighted> {
        debug!("rendering {} bytes of markdown", code.len());
        Ok(markdown::render(code, Theme::default()))
    }
}

/// Cut `[start, end)` out of the buffer's lines, returning the slice and its
/// first line index
///
/// With no bounds the code is returned untouched; otherwise the selected
/// lines are rejoined with `\n`.
fn slice_lines(code: &str, start: Option<usize>, end: Option<usize>) -> (String, usize) {
    if start.is_none() && end.is_none() {
        return (code.to_string(), 0);
    }
    let lines: Vec<&str> = code.lines().collect();
    let end = end.unwrap_or(lines.len()).min(lines.len());
    let start = start.unwrap_or(0).min(end);
    (lines[start..end].join("\n"), start)
}
