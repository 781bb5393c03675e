//! Compositing accepted spans into a render-ready sequence
//!
//! `compose` fills the gaps between accepted spans with the background
//! style. `Engine` is the entry point used once per render: it routes a
//! step to the markdown or syntax collaborator when the focus list asks for
//! one, and through resolution and compositing otherwise.

use log::debug;

use crate::buffer::TextBuffer;
use crate::error::Result;
use crate::focus::FocusList;
use crate::resolve::{check_bounds, resolve};
use crate::style::{Span, Style};
use crate::syntax::{Highlighted, MarkdownRenderer, SyntaxHighlighter};

/// Produce the final span sequence for a buffer of `len` characters
///
/// `accepted` must be in acceptance order (sorted by start). With a
/// `background` style every offset in `[0, len)` not covered by an accepted
/// span gets a background span; without one, gaps are left out. Spans
/// outside the buffer are an error, never clamped.
pub fn compose(len: usize, accepted: &[Span], background: Option<Style>) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(accepted.len() * 2 + 1);
    let mut covered = 0;

    for span in accepted {
        check_bounds(span, len)?;
        if let Some(style) = background {
            if covered < span.start {
                out.push(Span::new(covered, span.start, style));
            }
        }
        out.push(*span);
        covered = covered.max(span.end);
    }

    if let Some(style) = background {
        if covered < len {
            out.push(Span::new(covered, len, style));
        }
    }
    Ok(out)
}

/// What the rendering surface should paint for one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    /// The original buffer with composited spans
    Spans(Vec<Span>),
    /// Pre-styled output of the syntax highlighter
    Syntax(Highlighted),
    /// Pre-styled output of the markdown renderer
    Markdown(Highlighted),
}

/// Renders steps, delegating to external collaborators when asked to
pub struct Engine<'a> {
    highlighter: &'a dyn SyntaxHighlighter,
    markdown: &'a dyn MarkdownRenderer,
    background: Style,
}

impl<'a> Engine<'a> {
    /// Create an engine with the given collaborators and dim style
    pub fn new(
        highlighter: &'a dyn SyntaxHighlighter,
        markdown: &'a dyn MarkdownRenderer,
        background: Style,
    ) -> Self {
        Self {
            highlighter,
            markdown,
            background,
        }
    }

    /// Render `code` for one step
    ///
    /// A markdown focus wins over a syntax focus; either one skips
    /// matching entirely.
    pub fn render(&self, code: &str, focuses: &FocusList, dim_background: bool) -> Result<Rendering> {
        if focuses.markdown() {
            debug!("step delegated to markdown renderer");
            return Ok(Rendering::Markdown(self.markdown.render_markdown(code)?));
        }
        if let Some(options) = focuses.syntax() {
            debug!("step delegated to syntax highlighter ({})", options.lexer);
            return Ok(Rendering::Syntax(self.highlighter.highlight(code, options)?));
        }

        let buffer = TextBuffer::new(code);
        let accepted = resolve(&buffer, focuses)?;
        let background = dim_background.then_some(self.background);
        Ok(Rendering::Spans(compose(buffer.len(), &accepted, background)?))
    }
}
