//! Numbering configuration
//!
//! The recognized options and their defaults, plus optional loading from a
//! TOML file under the user's configuration directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::document::numbering::pages::DEFAULT_LINES_PER_PAGE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Options recognized by the numbering pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NumberingOptions {
    pub enable_paragraph_numbers: bool,
    pub enable_line_numbers: bool,
    pub enable_page_numbers: bool,
    pub lines_per_page: u32,
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            enable_paragraph_numbers: true,
            enable_line_numbers: true,
            enable_page_numbers: true,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
        }
    }
}

impl NumberingOptions {
    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load options from the user config file, falling back to defaults
    /// when no file exists
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("docmark").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_behavior() {
        let options = NumberingOptions::default();
        assert!(options.enable_paragraph_numbers);
        assert!(options.enable_line_numbers);
        assert!(options.enable_page_numbers);
        assert_eq!(options.lines_per_page, 50);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let options: NumberingOptions =
            toml::from_str("lines-per-page = 40").expect("valid config");
        assert_eq!(options.lines_per_page, 40);
        assert!(options.enable_line_numbers);
    }

    #[test]
    fn wrong_value_types_are_rejected() {
        let parsed: Result<NumberingOptions, _> = toml::from_str("lines-per-page = \"many\"");
        assert!(parsed.is_err());
    }
}
