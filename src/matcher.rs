//! Candidate span collection
//!
//! One pure function per focus kind. Each reads the buffer and the focus and
//! returns raw candidate spans in character offsets; nothing here decides
//! which candidates survive.

use regex::Regex;

use crate::buffer::TextBuffer;
use crate::focus::{BetweenOptions, ContextWindow, Focus, MatchIndex};
use crate::style::{Span, Style};

/// Collect the candidate spans a focus produces over the buffer
///
/// `Range` bounds are passed through untouched; every other kind drops
/// zero-length matches. Syntax and markdown focuses produce nothing.
pub fn collect(buffer: &TextBuffer, focus: &Focus) -> Vec<Span> {
    match focus {
        Focus::Literal {
            pattern,
            match_index,
            style,
            ..
        }
        | Focus::Regex {
            pattern,
            match_index,
            style,
        } => pattern_spans(buffer, pattern, match_index, *style),
        Focus::Line { line_number, style } => line_spans(buffer, *line_number, *style),
        Focus::Range { start, end, style } => vec![Span::new(*start, *end, *style)],
        Focus::StartsWith {
            text,
            from_start_of_line,
            style,
        } => {
            if *from_start_of_line {
                anchored_prefix_spans(buffer, text, *style)
            } else {
                prefix_spans(buffer, text, *style)
            }
        }
        Focus::Between {
            pattern,
            options,
            match_index,
            style,
            ..
        } => between_spans(buffer, pattern, options, match_index, *style),
        Focus::LineContaining {
            pattern,
            window,
            match_index,
            style,
        } => context_spans(
            buffer,
            |line| line.contains(pattern.as_str()),
            window,
            match_index,
            *style,
        ),
        Focus::LineContainingRegex {
            pattern,
            window,
            match_index,
            style,
        } => context_spans(buffer, |line| pattern.is_match(line), window, match_index, *style),
        Focus::Syntax(_) | Focus::Markdown => Vec::new(),
    }
}

/// Every match of a compiled pattern, filtered by discovery index
fn pattern_spans(buffer: &TextBuffer, pattern: &Regex, index: &MatchIndex, style: Style) -> Vec<Span> {
    let matches = pattern
        .find_iter(buffer.text())
        .filter(|m| !m.is_empty())
        .map(|m| Span::new(buffer.char_offset(m.start()), buffer.char_offset(m.end()), style));
    index.filter(matches)
}

fn line_spans(buffer: &TextBuffer, line_number: usize, style: Style) -> Vec<Span> {
    buffer
        .lines()
        .get(line_number)
        .map(|line| Span::new(line.start, line.end, style))
        .into_iter()
        .filter(|span| !span.is_empty())
        .collect()
}

/// Lines whose indented content begins with `text`, from `text` to line end
fn anchored_prefix_spans(buffer: &TextBuffer, text: &str, style: Style) -> Vec<Span> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut spans = Vec::new();
    for line in buffer.lines() {
        if !line.text.trim_start().starts_with(text) {
            continue;
        }
        if let Some(byte) = line.text.find(text) {
            let start = line.start + line.text[..byte].chars().count();
            spans.push(Span::new(start, line.end, style));
        }
    }
    non_empty(spans)
}

/// Every occurrence of `text`, overlapping ones included, to the end of its line
fn prefix_spans(buffer: &TextBuffer, text: &str, style: Style) -> Vec<Span> {
    let haystack = buffer.text();
    if text.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(found) = haystack[pos..].find(text) {
        let start = pos + found;
        let end = haystack[start..]
            .find('\n')
            .map_or(haystack.len(), |nl| start + nl);
        spans.push(Span::new(buffer.char_offset(start), buffer.char_offset(end), style));

        // Step one character so overlapping occurrences are found too
        let step = haystack[start..].chars().next().map_or(1, char::len_utf8);
        pos = start + step;
    }
    non_empty(spans)
}

/// Text framed by two delimiters
///
/// Inclusive matches are consumed whole. Exclusive matches only consume the
/// body, so a closing delimiter can also open the next region.
fn between_spans(
    buffer: &TextBuffer,
    pattern: &Regex,
    options: &BetweenOptions,
    index: &MatchIndex,
    style: Style,
) -> Vec<Span> {
    let text = buffer.text();
    let to_span = |m: regex::Match<'_>| Span::new(buffer.char_offset(m.start()), buffer.char_offset(m.end()), style);

    let matches: Vec<Span> = if options.inclusive {
        pattern.find_iter(text).map(to_span).collect()
    } else {
        let mut bodies = Vec::new();
        let mut pos = 0;
        while pos <= text.len() {
            let Some(body) = pattern.captures_at(text, pos).and_then(|caps| caps.name("body")) else {
                break;
            };
            bodies.push(to_span(body));
            // Always move at least one character forward
            let step = text[pos..].chars().next().map_or(1, char::len_utf8);
            pos = body.end().max(pos + step);
        }
        bodies
    };
    index.filter(matches.into_iter().filter(|span| !span.is_empty()))
}

/// Matching lines widened by a context window, as whole lines with newlines
fn context_spans(
    buffer: &TextBuffer,
    is_match: impl Fn(&str) -> bool,
    window: &ContextWindow,
    index: &MatchIndex,
    style: Style,
) -> Vec<Span> {
    let lines = buffer.lines();
    let windows = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_match(line.text))
        .map(|(i, _)| {
            let first = i.saturating_sub(window.before);
            let last = i.saturating_add(window.after).min(lines.len() - 1);
            Span::new(lines[first].start, lines[last].next, style)
        });
    non_empty(index.filter(windows))
}

fn non_empty(spans: Vec<Span>) -> Vec<Span> {
    spans.into_iter().filter(|span| !span.is_empty()).collect()
}
