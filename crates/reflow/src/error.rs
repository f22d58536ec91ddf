//! Error types for reflow.

use std::io;

use thiserror::Error;

/// Errors raised while loading, rendering or writing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading an input or writing an output.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a valid JSON element tree.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not a valid YAML element tree.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration file is not valid TOML.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The element tree could not be rendered.
    #[error("render error: {0}")]
    Render(#[from] scribe::RenderError),
}

/// Result type for reflow operations.
pub type Result<T> = std::result::Result<T, Error>;
