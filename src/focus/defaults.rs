//! Per-kind default styles
//!
//! Focuses built from a tutorial file without an explicit `style` take
//! theirs from a `FocusDefaults` value owned by the caller.

use crate::style::{Color, Style};

/// Default style for each focus kind, plus the background dim style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusDefaults {
    pub literal: Style,
    pub regex: Style,
    pub line: Style,
    pub range: Style,
    pub starts_with: Style,
    pub between: Style,
    pub line_containing: Style,
    /// Style for text no focus covers when dimming is on
    pub background: Style,
}

impl Default for FocusDefaults {
    fn default() -> Self {
        Self {
            literal: Style::fg(Color::Yellow).with_bold(),
            regex: Style::fg(Color::Green).with_bold(),
            line: Style::fg(Color::Cyan).with_bold(),
            range: Style::fg(Color::Magenta).with_bold(),
            starts_with: Style::fg(Color::Blue).with_bold(),
            between: Style::fg(Color::Blue).with_bold(),
            line_containing: Style::fg(Color::Yellow).with_bold(),
            background: Style::dimmed(),
        }
    }
}

impl FocusDefaults {
    /// Look up a default by its config key (`literal`, `line-containing`, ...)
    pub fn get_mut(&mut self, kind: &str) -> Option<&mut Style> {
        match kind {
            "literal" => Some(&mut self.literal),
            "regex" => Some(&mut self.regex),
            "line" => Some(&mut self.line),
            "range" => Some(&mut self.range),
            "startswith" | "starts-with" => Some(&mut self.starts_with),
            "between" => Some(&mut self.between),
            "line-containing" => Some(&mut self.line_containing),
            "dim" | "background" => Some(&mut self.background),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_distinct_from_background() {
        let defaults = FocusDefaults::default();
        assert!(defaults.literal.bold);
        assert_eq!(defaults.regex.color, Some(Color::Green));
        assert_eq!(defaults.background, Style::dimmed());
        assert_ne!(defaults.line, defaults.range);
    }

    #[test]
    fn test_get_mut() {
        let mut defaults = FocusDefaults::default();
        *defaults.get_mut("line-containing").unwrap() = Style::fg(Color::Red);
        assert_eq!(defaults.line_containing, Style::fg(Color::Red));
        assert!(defaults.get_mut("starts-with").is_some());
        assert!(defaults.get_mut("syntax").is_none());
    }
}
