//! Tutorial files
//!
//! A tutorial is a TOML file of chapters, each a piece of code walked
//! through in steps:
//!
//! ```toml
//! [[chapters]]
//! title = "Hello"
//! code_file = "hello.py"
//!
//! [[chapters.steps]]
//! description = "The function name"
//! focus = [
//!     { type = "literal", text = "greet", word_boundary = true },
//!     { type = "line", line_number = 3, style = "italic green" },
//! ]
//! ```
//!
//! Files are deserialized as written, then converted into validated
//! [`Step`]s so that bad patterns and duplicate delegating focuses are
//! reported at load time.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{FocusError, Result};
use crate::focus::{
    BetweenOptions, ContextWindow, Focus, FocusDefaults, MatchIndex, Step, SyntaxOptions,
};
use crate::style::Style;

/// A loaded, validated tutorial
#[derive(Debug, Clone)]
pub struct Tutorial {
    pub title: Option<String>,
    pub chapters: Vec<Chapter>,
}

/// One piece of code and the steps that walk through it
#[derive(Debug, Clone)]
pub struct Chapter {
    pub title: String,
    pub code: String,
    pub steps: Vec<Step>,
}

impl Tutorial {
    /// Load a tutorial file; `code_file` paths are relative to it
    pub fn load(path: &Path, defaults: &FocusDefaults) -> Result<Self> {
        debug!("loading tutorial {}", path.display());
        let contents = fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&contents, base, defaults)
    }

    /// Parse tutorial text, resolving `code_file` against `base_dir`
    pub fn parse(contents: &str, base_dir: &Path, defaults: &FocusDefaults) -> Result<Self> {
        let file: TutorialFile = toml::from_str(contents)?;
        if file.chapters.is_empty() {
            return Err(FocusError::InvalidTutorial("no chapters".to_string()));
        }

        let chapters = file
            .chapters
            .into_iter()
            .enumerate()
            .map(|(i, chapter)| chapter.into_chapter(i, base_dir, defaults))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            title: file.title,
            chapters,
        })
    }

    /// Total number of steps across all chapters
    pub fn step_count(&self) -> usize {
        self.chapters.iter().map(|c| c.steps.len()).sum()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TutorialFile {
    title: Option<String>,
    #[serde(default)]
    chapters: Vec<ChapterFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChapterFile {
    title: String,
    code: Option<String>,
    code_file: Option<PathBuf>,
    #[serde(default)]
    steps: Vec<StepFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepFile {
    #[serde(default)]
    description: String,
    #[serde(default)]
    focus: Vec<FocusSpec>,
}

/// `match_index = 2` or `match_index = [0, 2]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndexSpec {
    One(usize),
    Many(Vec<usize>),
}

impl From<IndexSpec> for MatchIndex {
    fn from(spec: IndexSpec) -> Self {
        match spec {
            IndexSpec::One(i) => MatchIndex::One(i),
            IndexSpec::Many(v) => MatchIndex::Many(v),
        }
    }
}

fn yes() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum FocusSpec {
    Literal {
        text: String,
        #[serde(default)]
        word_boundary: bool,
        match_index: Option<IndexSpec>,
        style: Option<String>,
    },
    Regex {
        pattern: String,
        match_index: Option<IndexSpec>,
        style: Option<String>,
    },
    Line {
        line_number: usize,
        style: Option<String>,
    },
    Range {
        start: usize,
        end: usize,
        style: Option<String>,
    },
    #[serde(rename = "startswith")]
    StartsWith {
        text: String,
        #[serde(default)]
        from_start_of_line: bool,
        style: Option<String>,
    },
    Between {
        start: String,
        end: String,
        #[serde(default = "yes")]
        inclusive: bool,
        #[serde(default = "yes")]
        multiline: bool,
        #[serde(default)]
        greedy: bool,
        match_index: Option<usize>,
        style: Option<String>,
    },
    LineContaining {
        pattern: String,
        #[serde(default)]
        regex: bool,
        #[serde(default)]
        lines_before: usize,
        #[serde(default)]
        lines_after: usize,
        match_index: Option<usize>,
        style: Option<String>,
    },
    Syntax {
        lexer: Option<String>,
        theme: Option<String>,
        #[serde(default)]
        line_numbers: bool,
        start_line: Option<usize>,
        end_line: Option<usize>,
    },
    Markdown,
}

/// The named style, or the default for its focus kind
fn style_or(style: Option<String>, default: Style) -> Result<Style> {
    style.as_deref().map_or(Ok(default), Style::parse)
}

impl FocusSpec {
    fn into_focus(self, defaults: &FocusDefaults) -> Result<Focus> {
        let focus = match self {
            FocusSpec::Literal {
                text,
                word_boundary,
                match_index,
                style,
            } => {
                let style = style_or(style, defaults.literal)?;
                let focus = if word_boundary {
                    Focus::literal_word(&text, style)?
                } else {
                    Focus::literal(&text, style)?
                };
                match match_index {
                    Some(index) => focus.with_match_index(index),
                    None => focus,
                }
            }
            FocusSpec::Regex {
                pattern,
                match_index,
                style,
            } => {
                let focus = Focus::regex(&pattern, style_or(style, defaults.regex)?)?;
                match match_index {
                    Some(index) => focus.with_match_index(index),
                    None => focus,
                }
            }
            FocusSpec::Line { line_number, style } => {
                Focus::line(line_number, style_or(style, defaults.line)?)
            }
            FocusSpec::Range { start, end, style } => {
                Focus::range(start, end, style_or(style, defaults.range)?)
            }
            FocusSpec::StartsWith {
                text,
                from_start_of_line,
                style,
            } => Focus::starts_with(&text, from_start_of_line, style_or(style, defaults.starts_with)?),
            FocusSpec::Between {
                start,
                end,
                inclusive,
                multiline,
                greedy,
                match_index,
                style,
            } => {
                let options = BetweenOptions {
                    inclusive,
                    multiline,
                    greedy,
                };
                Focus::between(&start, &end, options, style_or(style, defaults.between)?)?
                    .with_match_index(match_index)
            }
            FocusSpec::LineContaining {
                pattern,
                regex,
                lines_before,
                lines_after,
                match_index,
                style,
            } => {
                let window = ContextWindow::new(lines_before, lines_after);
                let style = style_or(style, defaults.line_containing)?;
                let focus = if regex {
                    Focus::line_containing_regex(&pattern, window, style)?
                } else {
                    Focus::line_containing(&pattern, window, style)
                };
                focus.with_match_index(match_index)
            }
            FocusSpec::Syntax {
                lexer,
                theme,
                line_numbers,
                start_line,
                end_line,
            } => {
                let mut options = lexer.as_deref().map(SyntaxOptions::new).unwrap_or_default();
                options.theme = theme;
                options.line_numbers = line_numbers;
                options.start_line = start_line;
                options.end_line = end_line;
                Focus::syntax(options)
            }
            FocusSpec::Markdown => Focus::markdown(),
        };
        Ok(focus)
    }
}

impl ChapterFile {
    fn into_chapter(self, index: usize, base_dir: &Path, defaults: &FocusDefaults) -> Result<Chapter> {
        let code = match (self.code, self.code_file) {
            (Some(code), None) => code,
            (None, Some(file)) => {
                let path = base_dir.join(file);
                debug!("chapter {} code from {}", index, path.display());
                fs::read_to_string(&path)?
            }
            (Some(_), Some(_)) => {
                return Err(FocusError::InvalidTutorial(format!(
                    "chapter {} (`{}`) sets both code and code_file",
                    index, self.title
                )))
            }
            (None, None) => {
                return Err(FocusError::InvalidTutorial(format!(
                    "chapter {} (`{}`) has no code",
                    index, self.title
                )))
            }
        };

        let mut steps = Vec::with_capacity(self.steps.len());
        for step in self.steps {
            let focuses = step
                .focus
                .into_iter()
                .map(|spec| spec.into_focus(defaults))
                .collect::<Result<Vec<_>>>()?;
            steps.push(Step::new(&step.description, focuses)?);
        }

        Ok(Chapter {
            title: self.title,
            code,
            steps,
        })
    }
}
