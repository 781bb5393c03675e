//! Span resolution
//!
//! Runs every focus over the buffer, removes duplicate candidates, orders
//! them and sweeps out any candidate in a containment relationship with one
//! already accepted. Partial overlaps survive; where they cross, the span
//! accepted later is painted on top.

use std::cmp::Reverse;
use std::collections::HashSet;

use log::{debug, trace};

use crate::buffer::TextBuffer;
use crate::error::{FocusError, Result};
use crate::focus::{Focus, FocusList};
use crate::matcher;
use crate::style::Span;

/// A candidate span tagged with the position of the focus that produced it
#[derive(Debug, Clone, Copy)]
struct Candidate {
    span: Span,
    order: usize,
}

/// Resolve a focus list into accepted spans, in acceptance (paint) order
///
/// Delegating focuses contribute nothing here; callers check for them first.
pub fn resolve(buffer: &TextBuffer, focuses: &FocusList) -> Result<Vec<Span>> {
    let mut candidates = collect_candidates(buffer, focuses)?;

    // Earliest start first, then longest, then declaration order. The sort
    // is stable so the order key only has to break exact ties.
    candidates.sort_by_key(|c| (c.span.start, Reverse(c.span.len()), c.order));

    let accepted = sweep(candidates.iter().map(|c| c.span));
    debug!(
        "resolved {} candidate spans into {} accepted spans",
        candidates.len(),
        accepted.len()
    );
    Ok(accepted)
}

/// Gather candidates in declaration order, keeping the first of any duplicates
fn collect_candidates(buffer: &TextBuffer, focuses: &FocusList) -> Result<Vec<Candidate>> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for (order, focus) in focuses.iter().enumerate() {
        let spans = matcher::collect(buffer, focus);
        trace!("focus {} ({}) produced {} spans", order, focus, spans.len());

        if let Focus::Range { .. } = focus {
            for span in &spans {
                check_bounds(span, buffer.len())?;
            }
        }

        for span in spans {
            if seen.insert(span) {
                candidates.push(Candidate { span, order });
            }
        }
    }
    Ok(candidates)
}

/// Reject empty or out-of-buffer spans instead of clamping them
pub(crate) fn check_bounds(span: &Span, len: usize) -> Result<()> {
    if span.start >= span.end || span.end > len {
        return Err(FocusError::RangeOutOfBounds {
            start: span.start,
            end: span.end,
            len,
        });
    }
    Ok(())
}

/// Accept sorted candidates unless they contain, or are contained by, an
/// accepted span
fn sweep(sorted: impl Iterator<Item = Span>) -> Vec<Span> {
    let mut accepted: Vec<Span> = Vec::new();
    for candidate in sorted {
        let nested = accepted
            .iter()
            .any(|kept| kept.contains_span(&candidate) || candidate.contains_span(kept));
        if nested {
            trace!("rejected nested span {}..{}", candidate.start, candidate.end);
            continue;
        }
        accepted.push(candidate);
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::BetweenOptions;
    use crate::style::{Color, Style};
    use pretty_assertions::assert_eq;

    fn yellow() -> Style {
        Style::fg(Color::Yellow).with_bold()
    }

    fn green() -> Style {
        Style::fg(Color::Green).with_bold()
    }

    fn resolve_ranges(text: &str, focuses: Vec<Focus>) -> Vec<(usize, usize)> {
        let buffer = TextBuffer::new(text);
        let list = FocusList::new(focuses).unwrap();
        resolve(&buffer, &list)
            .unwrap()
            .iter()
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn test_containment_rejects_inner_span() {
        let focuses = vec![
            Focus::literal("[i]", yellow()).unwrap(),
            Focus::literal("i", green()).unwrap(),
        ];
        assert_eq!(resolve_ranges("[i]", focuses), vec![(0, 3)]);
    }

    #[test]
    fn test_containment_independent_of_declaration_order() {
        let focuses = vec![
            Focus::literal("i", green()).unwrap(),
            Focus::literal("[i]", yellow()).unwrap(),
        ];
        assert_eq!(resolve_ranges("[i]", focuses), vec![(0, 3)]);
    }

    #[test]
    fn test_longer_match_precedence() {
        let focuses = vec![
            Focus::literal("[i]", yellow()).unwrap(),
            Focus::literal_word("i", green()).unwrap(),
        ];
        let text = "test [i] and i in z[i, j]";
        assert_eq!(
            resolve_ranges(text, focuses),
            vec![(5, 8), (13, 14), (20, 21)]
        );
    }

    #[test]
    fn test_equal_spans_keep_first_declared() {
        let buffer = TextBuffer::new("abc");
        let list = FocusList::new(vec![
            Focus::literal("abc", yellow()).unwrap(),
            Focus::range(0, 3, green()),
        ])
        .unwrap();
        let spans = resolve(&buffer, &list).unwrap();
        assert_eq!(spans, vec![Span::new(0, 3, yellow())]);
    }

    #[test]
    fn test_partial_overlap_is_accepted() {
        let focuses = vec![Focus::range(0, 4, yellow()), Focus::range(2, 6, green())];
        assert_eq!(resolve_ranges("abcdefgh", focuses), vec![(0, 4), (2, 6)]);
    }

    #[test]
    fn test_duplicates_removed_by_value() {
        let focuses = vec![
            Focus::literal("ab", yellow()).unwrap(),
            Focus::literal("ab", yellow()).unwrap(),
        ];
        assert_eq!(resolve_ranges("ab ab", focuses), vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn test_order_is_by_start_then_length() {
        let focuses = vec![
            Focus::range(4, 6, yellow()),
            Focus::between("<", ">", BetweenOptions::default(), green()).unwrap(),
        ];
        assert_eq!(resolve_ranges("<ab>ccdd", focuses), vec![(0, 4), (4, 6)]);
    }

    #[test]
    fn test_range_out_of_bounds_is_error() {
        let buffer = TextBuffer::new("short");
        for focus in [
            Focus::range(2, 99, yellow()),
            Focus::range(3, 3, yellow()),
            Focus::range(4, 1, yellow()),
        ] {
            let list = FocusList::new(vec![focus]).unwrap();
            assert!(matches!(
                resolve(&buffer, &list),
                Err(FocusError::RangeOutOfBounds { len: 5, .. })
            ));
        }
    }

    #[test]
    fn test_idempotent() {
        let text = "test [i] and i in z[i, j]\nline two [i]";
        let build = || {
            vec![
                Focus::literal("[i]", yellow()).unwrap(),
                Focus::literal_word("i", green()).unwrap(),
                Focus::line(1, Style::fg(Color::Cyan)),
                Focus::starts_with("line", true, Style::fg(Color::Blue)),
            ]
        };
        let buffer = TextBuffer::new(text);
        let first = resolve(&buffer, &FocusList::new(build()).unwrap()).unwrap();
        let second = resolve(&buffer, &FocusList::new(build()).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
