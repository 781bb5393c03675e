//! Language definitions for syntax highlighting
//!
//! A `LanguageDefinition` combines pattern rules and multi-line rules for
//! one language, and tokenizes a line at a time.

use super::rules::{LineState, LineTokens, MultilineRule, PatternRule, Token};

/// A complete language definition for syntax highlighting
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Language name (e.g., "Rust", "Python")
    pub name: String,
    /// Lexer names and file extensions this language answers to
    pub aliases: Vec<String>,
    /// Single-line pattern rules, sorted by priority (highest first)
    pub patterns: Vec<PatternRule>,
    /// Multi-line rules for comments, strings, etc.
    pub multiline_rules: Vec<MultilineRule>,
}

/// The next thing to emit on a line
enum Next<'r> {
    Pattern(usize, usize, &'r PatternRule),
    Multiline(usize, usize, &'r MultilineRule),
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: vec![name.to_lowercase()],
            patterns: Vec::new(),
            multiline_rules: Vec::new(),
        }
    }

    /// Add a lexer name or file extension
    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_lowercase());
    }

    /// Add a pattern rule
    pub fn add_pattern(&mut self, rule: PatternRule) {
        self.patterns.push(rule);
        // Keep sorted by priority (highest first)
        self.patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Add a multiline rule
    pub fn add_multiline(&mut self, rule: MultilineRule) {
        self.multiline_rules.push(rule);
    }

    fn multiline_rule(&self, state_id: u8) -> Option<&MultilineRule> {
        self.multiline_rules.iter().find(|r| r.state_id == state_id)
    }

    /// Earliest construct starting at or after `pos`
    ///
    /// Multi-line rules win ties with pattern rules, then declaration order
    /// and priority decide.
    fn next_construct(&self, text: &str, pos: usize) -> Option<Next<'_>> {
        let mut best: Option<Next<'_>> = None;
        let mut best_start = usize::MAX;

        for rule in &self.multiline_rules {
            if let Some((start, end)) = rule.find_start(text, pos) {
                if start < best_start {
                    best_start = start;
                    best = Some(Next::Multiline(start, end, rule));
                }
            }
        }
        for rule in &self.patterns {
            if let Some((start, end)) = rule.find_at(text, pos) {
                if start < best_start {
                    best_start = start;
                    best = Some(Next::Pattern(start, end, rule));
                }
            }
        }
        best
    }

    /// Tokenize a single line of text
    ///
    /// Takes the line text and the state from the previous line. Returns
    /// tokens and the state for the next line.
    pub fn highlight_line(&self, text: &str, prev_state: LineState) -> LineTokens {
        let mut tokens = Vec::new();
        let mut pos = 0;

        // Finish a construct left open by an earlier line
        if let Some(rule) = prev_state
            .is_inside_multiline()
            .then(|| self.multiline_rule(prev_state.multiline_id))
            .flatten()
        {
            match rule.find_end(text, 0) {
                Some(end) => {
                    tokens.push(Token::new(0, end, rule.token_type));
                    pos = end;
                }
                None => {
                    if !text.is_empty() {
                        tokens.push(Token::new(0, text.len(), rule.token_type));
                    }
                    return LineTokens {
                        tokens,
                        end_state: prev_state,
                    };
                }
            }
        }

        while pos < text.len() {
            match self.next_construct(text, pos) {
                Some(Next::Pattern(start, end, rule)) => {
                    tokens.push(Token::new(start, end, rule.token_type));
                    pos = end;
                }
                Some(Next::Multiline(start, open_end, rule)) => match rule.find_end(text, open_end) {
                    Some(close) => {
                        tokens.push(Token::new(start, close, rule.token_type));
                        pos = close;
                    }
                    None => {
                        tokens.push(Token::new(start, text.len(), rule.token_type));
                        return LineTokens {
                            tokens,
                            end_state: LineState::inside(rule.state_id),
                        };
                    }
                },
                None => break,
            }
        }

        LineTokens {
            tokens,
            end_state: LineState::default(),
        }
    }
}
