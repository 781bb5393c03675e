//! Markdown rendering from the pulldown-cmark event stream
//!
//! Markup characters are dropped from the output text. What they meant
//! survives as themed spans: headings, emphasis, inline and block code,
//! links, list bullets and quote bars.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::tokens::{Theme, TokenType};
use super::Highlighted;
use crate::style::{Span, Style};

const RULE_WIDTH: usize = 40;

/// Render `markdown` into plain text plus styled spans
pub fn render(markdown: &str, theme: Theme) -> Highlighted {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = Writer::new(theme);
    for event in Parser::new_ext(markdown, options) {
        writer.event(event);
    }
    writer.finish()
}

/// Accumulates output while walking the event stream
struct Writer {
    theme: Theme,
    text: String,
    spans: Vec<Span>,
    /// Characters written so far
    chars: usize,
    at_line_start: bool,
    heading: bool,
    emphasis: usize,
    strong: usize,
    strike: usize,
    link: usize,
    quote: usize,
    code_block: bool,
    table_head: bool,
    /// The current line holds only a list bullet so far
    after_bullet: bool,
    /// Open lists, innermost last; ordered lists carry their next number
    lists: Vec<Option<u64>>,
}

impl Writer {
    fn new(theme: Theme) -> Self {
        Self {
            theme,
            text: String::new(),
            spans: Vec::new(),
            chars: 0,
            at_line_start: true,
            heading: false,
            emphasis: 0,
            strong: 0,
            strike: 0,
            link: 0,
            quote: 0,
            code_block: false,
            table_head: false,
            after_bullet: false,
            lists: Vec::new(),
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.code_block {
                    self.push_lines(&text, self.theme.style(TokenType::String));
                } else {
                    self.push(&text, self.inline_style());
                }
            }
            Event::Code(code) => {
                let style = self.inline_style().overlay(self.theme.style(TokenType::String));
                self.push(&code, style);
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_lines(&html, self.theme.style(TokenType::Comment));
            }
            Event::SoftBreak => self.push(" ", self.inline_style()),
            Event::HardBreak => self.newline(),
            Event::Rule => {
                self.open_block();
                self.push(&"─".repeat(RULE_WIDTH), self.theme.gutter());
                self.line_break();
            }
            Event::TaskListMarker(done) => {
                let marker = if done { "[x] " } else { "[ ] " };
                self.push(marker, self.theme.style(TokenType::Operator));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph | Tag::Table(_) => self.open_block(),
            Tag::Heading { .. } => {
                self.open_block();
                self.heading = true;
            }
            Tag::BlockQuote(_) => {
                self.open_block();
                self.quote += 1;
            }
            Tag::CodeBlock(_) => {
                self.open_block();
                self.code_block = true;
            }
            Tag::List(first) => {
                if self.lists.is_empty() {
                    self.open_block();
                } else {
                    self.line_break();
                }
                self.lists.push(first);
            }
            Tag::Item => {
                self.line_break();
                self.prefix(self.lists.len().saturating_sub(1));
                let bullet = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let bullet = format!("{}. ", next);
                        *next += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                };
                self.push(&bullet, self.theme.style(TokenType::Operator));
                self.after_bullet = true;
            }
            Tag::TableHead => self.table_head = true,
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => self.strike += 1,
            Tag::Link { .. } | Tag::Image { .. } => self.link += 1,
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Item | TagEnd::TableRow | TagEnd::Table => {
                self.line_break()
            }
            TagEnd::Heading { .. } => {
                self.heading = false;
                self.line_break();
            }
            TagEnd::BlockQuote { .. } => {
                self.quote = self.quote.saturating_sub(1);
                self.line_break();
            }
            TagEnd::CodeBlock => {
                self.code_block = false;
                self.line_break();
            }
            TagEnd::List { .. } => {
                self.lists.pop();
                self.line_break();
            }
            TagEnd::TableHead => {
                self.table_head = false;
                self.line_break();
            }
            TagEnd::TableCell => self.push("  ", Style::default()),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => self.strike = self.strike.saturating_sub(1),
            TagEnd::Link | TagEnd::Image => self.link = self.link.saturating_sub(1),
            _ => {}
        }
    }

    /// Style of running text under the open inline tags
    fn inline_style(&self) -> Style {
        let mut style = Style::default();
        if self.heading {
            style = style.overlay(self.theme.style(TokenType::Heading));
        }
        if self.emphasis > 0 {
            style = style.overlay(self.theme.style(TokenType::Emphasis));
        }
        if self.strong > 0 || self.table_head {
            style = style.with_bold();
        }
        if self.strike > 0 {
            style = style.with_strike();
        }
        if self.link > 0 {
            style = style.overlay(self.theme.style(TokenType::Link));
        }
        style
    }

    /// Separate a new top-level block from the previous one by a blank line
    fn open_block(&mut self) {
        self.line_break();
        if self.lists.is_empty() && !self.text.is_empty() && !self.text.ends_with("\n\n") {
            self.newline();
        }
    }

    fn line_break(&mut self) {
        if !self.at_line_start && !self.after_bullet {
            self.newline();
        }
    }

    fn newline(&mut self) {
        self.after_bullet = false;
        self.text.push('\n');
        self.chars += 1;
        self.at_line_start = true;
    }

    /// Quote bars and indentation owed at the start of a line
    fn prefix(&mut self, list_depth: usize) {
        self.at_line_start = false;
        for _ in 0..self.quote {
            self.write("│ ", self.theme.gutter());
        }
        self.write(&"  ".repeat(list_depth), Style::default());
        if self.code_block {
            self.write("    ", Style::default());
        }
    }

    /// Write inline text, emitting the line prefix first when needed
    fn push(&mut self, s: &str, style: Style) {
        if s.is_empty() {
            return;
        }
        if self.at_line_start {
            self.prefix(self.lists.len());
        }
        self.after_bullet = false;
        self.write(s, style);
    }

    /// Write text that carries its own line breaks
    fn push_lines(&mut self, s: &str, style: Style) {
        for (i, line) in s.split('\n').enumerate() {
            if i > 0 {
                self.newline();
            }
            self.push(line, style);
        }
    }

    fn write(&mut self, s: &str, style: Style) {
        let start = self.chars;
        self.text.push_str(s);
        self.chars += s.chars().count();
        if !style.is_default() && start < self.chars {
            self.spans.push(Span::new(start, self.chars, style));
        }
    }

    fn finish(mut self) -> Highlighted {
        while self.text.ends_with('\n') {
            self.text.pop();
            self.chars -= 1;
        }
        Highlighted {
            text: self.text,
            spans: self.spans,
        }
    }
}
