//! Terminal output using crossterm
//!
//! The `Painter` turns a `Rendering` into styled terminal output. It writes
//! to any `io::Write` so output can be captured.

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::composite::Rendering;
use crate::error::Result;
use crate::style::{Color, Span, Style};

/// Writes styled text to a terminal (or anything else that takes bytes)
pub struct Painter<W: Write> {
    out: W,
    /// Tab width for display
    tab_width: usize,
}

impl<W: Write> Painter<W> {
    /// Create a painter writing to `out`
    pub fn new(out: W, tab_width: usize) -> Self {
        Self {
            out,
            tab_width: tab_width.max(1),
        }
    }

    /// Paint one step's rendering of `code`
    ///
    /// Collaborator output carries its own text; plain span output paints
    /// the buffer itself.
    pub fn paint(&mut self, code: &str, rendering: &Rendering) -> Result<()> {
        match rendering {
            Rendering::Spans(spans) => self.paint_styled(code, spans),
            Rendering::Syntax(out) | Rendering::Markdown(out) => self.paint_styled(&out.text, &out.spans),
        }
    }

    /// Write a caption line in bold
    pub fn caption(&mut self, text: &str) -> Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            Print("\n")
        )?;
        Ok(())
    }

    /// Write an unstyled line
    pub fn line(&mut self, text: &str) -> Result<()> {
        queue!(self.out, Print(text), Print("\n"))?;
        Ok(())
    }

    /// Paint `text` with spans applied in order, later spans on top
    ///
    /// Each styled run is reset after it; output always ends on a fresh line.
    pub fn paint_styled(&mut self, text: &str, spans: &[Span]) -> Result<()> {
        let styles = char_styles(text.chars().count(), spans);
        let mut current = Style::default();
        let mut col = 0;
        let mut run = String::new();

        for (ch, &style) in text.chars().zip(&styles) {
            if ch == '\n' {
                self.flush_run(&mut run, current)?;
                current = Style::default();
                queue!(self.out, Print("\n"))?;
                col = 0;
                continue;
            }

            if style != current {
                self.flush_run(&mut run, current)?;
                current = style;
            }

            if ch == '\t' {
                let spaces = self.tab_width - col % self.tab_width;
                run.extend(std::iter::repeat(' ').take(spaces));
                col += spaces;
            } else {
                run.push(ch);
                col += ch.width().unwrap_or(1);
            }
        }

        self.flush_run(&mut run, current)?;
        if !text.is_empty() && !text.ends_with('\n') {
            queue!(self.out, Print("\n"))?;
        }
        Ok(())
    }

    /// Emit buffered characters in `style`, then reset what was set
    fn flush_run(&mut self, run: &mut String, style: Style) -> Result<()> {
        if run.is_empty() {
            return Ok(());
        }
        if style.is_default() {
            queue!(self.out, Print(run.as_str()))?;
        } else {
            self.set_style(style)?;
            queue!(self.out, Print(run.as_str()), SetAttribute(Attribute::Reset))?;
        }
        run.clear();
        Ok(())
    }

    /// Queue the commands that switch to `style`
    fn set_style(&mut self, style: Style) -> Result<()> {
        if let Some(color) = style.color {
            queue!(self.out, SetForegroundColor(to_crossterm(color)))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        if style.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if style.strike {
            queue!(self.out, SetAttribute(Attribute::CrossedOut))?;
        }
        Ok(())
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Resolve the style of every character by painting spans in order
fn char_styles(len: usize, spans: &[Span]) -> Vec<Style> {
    let mut styles = vec![Style::default(); len];
    for span in spans {
        let end = span.end.min(len);
        for style in styles.iter_mut().take(end).skip(span.start) {
            *style = style.overlay(span.style);
        }
    }
    styles
}

/// Map a palette color to crossterm's naming (plain ANSI colors are "dark")
fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Highlighted;
    use pretty_assertions::assert_eq;

    fn painted(code: &str, rendering: &Rendering) -> String {
        let mut painter = Painter::new(Vec::new(), 4);
        painter.paint(code, rendering).unwrap();
        String::from_utf8(painter.into_inner()).unwrap()
    }

    /// Drop CSI escape sequences, leaving the visible text
    fn visible(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    #[test]
    fn test_plain_text_passes_through() {
        let out = painted("a = 1\nb = 2\n", &Rendering::Spans(Vec::new()));
        assert_eq!(out, "a = 1\nb = 2\n");
    }

    #[test]
    fn test_styled_run_is_wrapped_and_reset() {
        let bold = Style::default().with_bold();
        let out = painted("let x", &Rendering::Spans(vec![Span::new(4, 5, bold)]));
        assert_eq!(out, "let \x1b[1mx\x1b[0m\n");
    }

    #[test]
    fn test_color_and_reset_at_line_end() {
        let red = Style::fg(Color::Red);
        let out = painted("ab\ncd", &Rendering::Spans(vec![Span::new(1, 4, red)]));
        assert_eq!(visible(&out), "ab\ncd\n");
        assert!(out.starts_with("a\x1b[38;5;1mb\x1b[0m\n"));
        assert!(out.contains("\n\x1b[38;5;1mc\x1b[0md"));
    }

    #[test]
    fn test_tabs_expand_to_columns() {
        let out = painted("\tx\nab\ty", &Rendering::Spans(Vec::new()));
        assert_eq!(out, "    x\nab  y\n");
    }

    #[test]
    fn test_wide_chars_advance_two_columns() {
        let out = painted("日\tx", &Rendering::Spans(Vec::new()));
        assert_eq!(out, "日  x\n");
    }

    #[test]
    fn test_highlighted_text_replaces_buffer() {
        let rendering = Rendering::Syntax(Highlighted {
            text: "1 code".to_string(),
            spans: Vec::new(),
        });
        assert_eq!(painted("code", &rendering), "1 code\n");
    }

    #[test]
    fn test_later_spans_paint_on_top() {
        let styles = char_styles(
            4,
            &[
                Span::new(0, 3, Style::fg(Color::Red)),
                Span::new(1, 4, Style::fg(Color::Blue).with_bold()),
            ],
        );
        assert_eq!(styles[0], Style::fg(Color::Red));
        assert_eq!(styles[1], Style::fg(Color::Blue).with_bold());
        assert_eq!(styles[3], Style::fg(Color::Blue).with_bold());
    }

    #[test]
    fn test_caption() {
        let mut painter = Painter::new(Vec::new(), 4);
        painter.caption("Step 1").unwrap();
        let out = String::from_utf8(painter.into_inner()).unwrap();
        assert_eq!(out, "\x1b[1mStep 1\x1b[0m\n");
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(to_crossterm(Color::BrightBlack), style::Color::DarkGrey);
        assert_eq!(to_crossterm(Color::Rgb(1, 2, 3)), style::Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
