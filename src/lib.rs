//! codefocus - step-by-step code highlighting
//!
//! Each step of a walkthrough names a set of focuses over a piece of code.
//! The engine finds every matching span, drops spans nested inside larger
//! ones, fills the gaps with a dim style and hands the result to a
//! rendering surface. Steps may instead delegate the whole buffer to a
//! syntax highlighter or markdown renderer.

pub mod buffer;
pub mod composite;
pub mod config;
pub mod error;
pub mod focus;
pub mod matcher;
pub mod resolve;
pub mod style;
pub mod syntax;
pub mod terminal;
pub mod tutorial;

pub use buffer::TextBuffer;
pub use composite::{compose, Engine, Rendering};
pub use config::Config;
pub use error::{FocusError, Result};
pub use focus::{
    BetweenOptions, ContextWindow, Focus, FocusDefaults, FocusList, MatchIndex, Step, SyntaxOptions,
};
pub use resolve::resolve;
pub use style::{Color, Span, Style};
pub use syntax::{Highlighted, MarkdownRenderer, SyntaxHighlighter, SyntaxManager};
pub use terminal::Painter;
pub use tutorial::{Chapter, Tutorial};
