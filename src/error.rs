//! Error types for codefocus

use thiserror::Error;

/// Result type alias for codefocus operations
pub type Result<T> = std::result::Result<T, FocusError>;

/// Focus construction, resolution and loading errors
#[derive(Error, Debug)]
pub enum FocusError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Only one syntax focus is allowed per step")]
    DuplicateSyntax,

    #[error("Only one markdown focus is allowed per step")]
    DuplicateMarkdown,

    #[error("Range {start}..{end} is outside the buffer (length {len})")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Unknown color: {0}")]
    InvalidColor(String),

    #[error("Invalid style `{0}`")]
    InvalidStyle(String),

    #[error("Tutorial parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid tutorial: {0}")]
    InvalidTutorial(String),
}

impl FocusError {
    /// Wrap a regex compile failure with the pattern that caused it
    pub(crate) fn pattern(pattern: &str, source: regex::Error) -> Self {
        FocusError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}
