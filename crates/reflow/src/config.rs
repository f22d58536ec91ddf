//! Configuration file support.
//!
//! ```toml
//! wrap = 80
//! output_dir = "out"
//! suffix = ".adoc"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_SUFFIX: &str = ".adoc";

/// Rendering and output settings.
///
/// # Example
///
/// ```rust
/// use reflow::Config;
///
/// let config = Config::new().wrap(80).output_dir("out");
/// assert_eq!(config.wrap, 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Wrap column. `0` disables wrapping.
    pub wrap: usize,
    /// Directory rendered documents are written to.
    pub output_dir: Option<PathBuf>,
    /// Appended to each input's file stem to name its output.
    pub suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap: 0,
            output_dir: None,
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl Config {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wrap column.
    #[must_use]
    pub fn wrap(mut self, wrap: usize) -> Self {
        self.wrap = wrap;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the output file suffix.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or has unknown keys.
    pub fn from_toml(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
