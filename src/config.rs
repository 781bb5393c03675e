//! Configuration file support
//!
//! Loads settings from ~/.codefocus.conf (or %USERPROFILE%\.codefocus.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # codefocus configuration
//! dim-background = true
//! tab-width = 4
//! literal-style = bold yellow
//! regex-style = italic #88c0d0
//! dim-style = dim
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::focus::FocusDefaults;
use crate::style::Style;

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether uncovered text is dimmed
    pub dim_background: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Styles for focuses that do not name one
    pub defaults: FocusDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dim_background: true,
            tab_width: 4,
            defaults: FocusDefaults::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".codefocus.conf"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".codefocus.conf"))
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::from_file(&path),
            None => Config::default(),
        }
    }

    /// Load configuration from a file; a missing file gives the defaults
    pub fn from_file(path: &Path) -> Self {
        let mut config = Config::default();
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!("loading config from {}", path.display());
                config.apply(&Self::parse(&contents));
            }
            Err(e) => debug!("no config at {}: {}", path.display(), e),
        }
        config
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        for (key, value) in settings {
            match key.as_str() {
                "dim-background" => self.dim_background = parse_bool(value),
                "tab-width" => match value.parse::<usize>() {
                    Ok(n) => self.tab_width = n.clamp(1, 16),
                    Err(_) => warn!("ignoring tab-width `{}`", value),
                },
                _ => {
                    let Some(kind) = key.strip_suffix("-style") else {
                        warn!("unknown config key `{}`", key);
                        continue;
                    };
                    let Some(slot) = self.defaults.get_mut(kind) else {
                        warn!("unknown focus kind in `{}`", key);
                        continue;
                    };
                    match Style::parse(value) {
                        Ok(style) => *slot = style,
                        Err(e) => warn!("ignoring {}: {}", key, e),
                    }
                }
            }
        }
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}
