//! End-to-end behaviour of the focus engine

use codefocus::{
    BetweenOptions, Color, ContextWindow, Engine, Focus, FocusDefaults, FocusList, Rendering,
    Span, Style, SyntaxManager, SyntaxOptions, Tutorial,
};
use pretty_assertions::assert_eq;
use std::path::Path;

fn hl() -> Style {
    Style::fg(Color::Yellow).with_bold()
}

fn render(code: &str, focuses: Vec<Focus>, dim: bool) -> Vec<Span> {
    let syntax = SyntaxManager::new().unwrap();
    let engine = Engine::new(&syntax, &syntax, Style::dimmed());
    let list = FocusList::new(focuses).unwrap();
    match engine.render(code, &list, dim).unwrap() {
        Rendering::Spans(spans) => spans,
        other => panic!("expected spans, got {:?}", other),
    }
}

fn highlighted(code: &str, focuses: Vec<Focus>) -> Vec<(usize, usize)> {
    render(code, focuses, false)
        .into_iter()
        .map(|s| (s.start, s.end))
        .collect()
}

/// Assert `spans` leaves no offset of `[0, len)` uncovered and nothing outside
fn assert_covers(spans: &[Span], len: usize) {
    let mut sorted = spans.to_vec();
    sorted.sort_by_key(|s| s.start);
    let mut covered = 0;
    for span in &sorted {
        assert!(span.start <= covered, "gap before {:?}", span);
        assert!(span.end <= len, "{:?} past end {}", span, len);
        covered = covered.max(span.end);
    }
    assert_eq!(covered, len);
}

#[test]
fn dim_background_partitions_disjoint_spans() {
    let code = "fn main() {\n    let x = 1;\n}\n";
    let spans = render(
        code,
        vec![
            Focus::literal("main", hl()).unwrap(),
            Focus::line(1, hl()),
        ],
        true,
    );

    let mut pos = 0;
    for span in &spans {
        assert_eq!(span.start, pos);
        assert!(span.end > span.start);
        pos = span.end;
    }
    assert_eq!(pos, code.chars().count());
}

#[test]
fn dim_background_covers_overlapping_and_empty_focus_lists() {
    let code = "alpha beta gamma";
    let spans = render(
        code,
        vec![
            Focus::range(0, 8, hl()),
            Focus::range(6, 12, Style::fg(Color::Red)),
        ],
        true,
    );
    assert_covers(&spans, code.len());

    let none = render(code, Vec::new(), true);
    assert_eq!(none, vec![Span::new(0, code.len(), Style::dimmed())]);
}

const ALPHABET: [char; 10] = ['a', 'i', ' ', ',', '<', '>', '\n', 'é', '日', '_'];

fn buffer_from(seed: &[u8]) -> String {
    seed.iter().map(|&b| ALPHABET[b as usize % ALPHABET.len()]).collect()
}

/// One focus per seed byte, drawn from every matching kind
fn focuses_from(seed: &[u8], len: usize) -> Vec<Focus> {
    let styles = [hl(), Style::fg(Color::Cyan), Style::default().with_underline()];
    seed.iter()
        .enumerate()
        .map(|(i, &b)| {
            let style = styles[i % styles.len()];
            let text = ALPHABET[b as usize % ALPHABET.len()].to_string();
            let n = b as usize / ALPHABET.len();
            match b % 8 {
                0 => Focus::literal(&text, style).unwrap(),
                1 => Focus::literal_word(&text, style).unwrap().with_match_index(n % 3),
                2 => Focus::line(n % 4, style),
                3 if len > 0 => {
                    let start = n % len;
                    Focus::range(start, start + 1 + b as usize % (len - start), style)
                }
                4 => Focus::starts_with(&text, n % 2 == 0, style),
                5 => {
                    let options = BetweenOptions {
                        inclusive: n % 2 == 0,
                        greedy: n % 3 == 0,
                        ..BetweenOptions::default()
                    };
                    Focus::between("<", ">", options, style).unwrap()
                }
                6 => Focus::line_containing(&text, ContextWindow::new(n % 2, n % 3), style),
                _ => Focus::regex(r"\w+", style).unwrap(),
            }
        })
        .collect()
}

quickcheck::quickcheck! {
    fn rendering_covers_any_buffer(code_seed: Vec<u8>, focus_seed: Vec<u8>) -> bool {
        let code = buffer_from(&code_seed);
        let len = code.chars().count();
        let focus_seed = &focus_seed[..focus_seed.len().min(12)];

        let plain = render(&code, focuses_from(focus_seed, len), false);
        let dimmed = render(&code, focuses_from(focus_seed, len), true);
        let again = render(&code, focuses_from(focus_seed, len), true);

        let in_bounds = plain.iter().chain(&dimmed).all(|s| s.start < s.end && s.end <= len);
        let mut covered = 0;
        let mut sorted = dimmed.clone();
        sorted.sort_by_key(|s| s.start);
        let no_gaps = sorted.iter().all(|s| {
            let ok = s.start <= covered;
            covered = covered.max(s.end);
            ok
        });
        in_bounds && no_gaps && covered == len && dimmed == again
    }
}

#[test]
fn contained_span_is_rejected() {
    let spans = highlighted(
        "[i]",
        vec![
            Focus::literal("[i]", hl()).unwrap(),
            Focus::literal("i", hl()).unwrap(),
        ],
    );
    assert_eq!(spans, vec![(0, 3)]);
}

#[test]
fn word_boundary_precision() {
    let code = "i init in string";
    assert_eq!(
        highlighted(code, vec![Focus::literal("i", hl()).unwrap()]),
        vec![(0, 1), (2, 3), (4, 5), (7, 8), (13, 14)]
    );
    assert_eq!(
        highlighted(code, vec![Focus::literal_word("i", hl()).unwrap()]),
        vec![(0, 1)]
    );
}

#[test]
fn longer_match_takes_precedence() {
    let spans = highlighted(
        "test [i] and i in z[i, j]",
        vec![
            Focus::literal("[i]", hl()).unwrap(),
            Focus::literal_word("i", Style::fg(Color::Cyan)).unwrap(),
        ],
    );
    assert_eq!(spans, vec![(5, 8), (13, 14), (20, 21)]);
}

#[test]
fn rendering_is_idempotent() {
    let code = "let a = b + a;\nlet b = a;\n";
    let focuses = || {
        vec![
            Focus::regex(r"\b[ab]\b", hl()).unwrap(),
            Focus::literal("a", Style::fg(Color::Red)).unwrap(),
            Focus::line_containing("let b", ContextWindow::new(0, 0), Style::fg(Color::Blue)),
            Focus::literal("a", Style::fg(Color::Red)).unwrap(),
        ]
    };
    let first = render(code, focuses(), true);
    let second = render(code, focuses(), true);
    assert_eq!(first, second);
}

#[test]
fn between_lazy_and_greedy() {
    let lazy = BetweenOptions::default();
    let greedy = BetweenOptions {
        greedy: true,
        ..BetweenOptions::default()
    };
    assert_eq!(
        highlighted("<a><b>", vec![Focus::between("<", ">", lazy, hl()).unwrap()]),
        vec![(0, 3), (3, 6)]
    );
    assert_eq!(
        highlighted("<a><b>", vec![Focus::between("<", ">", greedy, hl()).unwrap()]),
        vec![(0, 6)]
    );
}

#[test]
fn line_context_window() {
    let code = "one\ntwo\nX marks\nfour\nfive";
    let spans = highlighted(
        code,
        vec![Focus::line_containing("X", ContextWindow::new(1, 1), hl())],
    );
    // lines 1..=3: "two\nX marks\nfour\n"
    assert_eq!(spans, vec![(4, 21)]);
}

#[test]
fn out_of_bounds_range_fails() {
    let syntax = SyntaxManager::new().unwrap();
    let engine = Engine::new(&syntax, &syntax, Style::dimmed());
    let list = FocusList::new(vec![Focus::range(2, 50, hl())]).unwrap();
    assert!(engine.render("short", &list, true).is_err());
}

#[test]
fn syntax_focus_bypasses_matching() {
    let syntax = SyntaxManager::new().unwrap();
    let engine = Engine::new(&syntax, &syntax, Style::dimmed());
    let list = FocusList::new(vec![
        Focus::literal("x", hl()).unwrap(),
        Focus::syntax(SyntaxOptions::new("rust")),
    ])
    .unwrap();
    match engine.render("let x = 1;", &list, true).unwrap() {
        Rendering::Syntax(out) => assert_eq!(out.text, "let x = 1;"),
        other => panic!("expected syntax output, got {:?}", other),
    }
}

#[test]
fn tutorial_steps_render() {
    let tutorial = Tutorial::parse(
        r#"
[[chapters]]
title = "Call"
code = "print(greet('world'))"

[[chapters.steps]]
description = "Arguments"
focus = [{ type = "between", start = "\\(", end = "\\)", inclusive = false, greedy = true }]
"#,
        Path::new("."),
        &FocusDefaults::default(),
    )
    .unwrap();

    let chapter = &tutorial.chapters[0];
    let spans = render(&chapter.code, chapter.steps[0].focuses.iter().cloned().collect(), false);
    assert_eq!(spans, vec![Span::new(6, 20, FocusDefaults::default().between)]);
}
