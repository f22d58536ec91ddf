#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Reflow
//!
//! Batch front end for the `scribe` renderer: loads pre-parsed AsciiDoc
//! element trees from JSON or YAML files and writes their canonical,
//! optionally wrapped, source text.
//!
//! ## Example
//!
//! ```rust
//! use reflow::{Config, Reflow};
//!
//! let json = r#"{"elements":[{"type":"paragraph","elements":[{"type":"text","text":"Hello world\n"}]}]}"#;
//! let doc = reflow::document_from_json(json).unwrap();
//!
//! let reflow = Reflow::new(Config::new().wrap(8));
//! assert_eq!(reflow.render(&doc).unwrap(), "Hello\nworld\n");
//! ```

pub mod cli;
mod config;
mod error;

use std::fs;
use std::path::{Path, PathBuf};

use adoc::Document;
use rayon::prelude::*;
use scribe::Renderer;
use tracing::{debug, instrument};

pub use config::Config;
pub use error::{Error, Result};

/// Input formats recognized by [`load_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFormat`] for any extension other than
    /// `json`, `yaml` or `yml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some(ext) => Err(Error::UnsupportedFormat(ext.to_string())),
            None => Err(Error::UnsupportedFormat("unknown".to_string())),
        }
    }
}

/// Parses a JSON element tree.
///
/// # Errors
/// Returns an error if the JSON does not describe a [`Document`].
pub fn document_from_json(json: &str) -> Result<Document> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a YAML element tree.
///
/// # Errors
/// Returns an error if the YAML does not describe a [`Document`].
pub fn document_from_yaml(yaml: &str) -> Result<Document> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Loads an element tree, choosing the parser from the file extension.
///
/// # Errors
/// Returns an error if the extension is unsupported, the file cannot be
/// read, or its contents do not parse.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    match format {
        InputFormat::Json => document_from_json(&content),
        InputFormat::Yaml => document_from_yaml(&content),
    }
}

/// The outcome of rendering one input file.
#[derive(Debug)]
pub struct Rendered {
    pub input: PathBuf,
    pub result: Result<String>,
}

/// Renders documents according to a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Reflow {
    config: Config,
}

impl Reflow {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn renderer(&self) -> Renderer {
        Renderer::new().with_wrap(self.config.wrap)
    }

    /// Renders an in-memory document.
    ///
    /// # Errors
    /// Returns [`Error::Render`] if the tree holds an element the renderer
    /// does not support.
    pub fn render(&self, doc: &Document) -> Result<String> {
        Ok(self.renderer().render(doc)?)
    }

    /// Loads and renders a single file.
    ///
    /// # Errors
    /// Returns an error if loading or rendering fails.
    #[instrument(skip(self), fields(wrap = self.config.wrap))]
    pub fn render_file(&self, path: &Path) -> Result<String> {
        let doc = load_document(path)?;
        debug!(elements = doc.elements.len(), "loaded document");
        self.render(&doc)
    }

    /// Renders every input in parallel. Results keep the input order.
    pub fn render_all(&self, inputs: &[PathBuf]) -> Vec<Rendered> {
        inputs
            .par_iter()
            .map(|input| Rendered {
                input: input.clone(),
                result: self.render_file(input),
            })
            .collect()
    }

    /// Where the rendering of `input` is written, or `None` when no output
    /// directory is configured.
    pub fn output_path(&self, input: &Path) -> Option<PathBuf> {
        let dir = self.config.output_dir.as_ref()?;
        let stem = input.file_stem().map_or_else(
            || "document".to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        );
        Some(dir.join(format!("{stem}{}", self.config.suffix)))
    }
}

/// Commonly used types.
pub mod prelude {
    pub use crate::{Config, Error, Reflow, Rendered, Result, load_document};
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JSON: &str = r#"{
        "elements": [
            {"type": "section", "level": 1, "title": [{"type": "text", "text": "Intro"}],
             "elements": [
                {"type": "paragraph", "elements": [
                    {"type": "text", "text": "one two\nthree four five\n"}
                ]}
             ]}
        ]
    }"#;

    const YAML: &str = "
elements:
  - type: paragraph
    elements:
      - type: text
        text: \"alpha beta\\n\"
";

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("a.json")).unwrap(),
            InputFormat::Json
        );
        assert_eq!(
            InputFormat::from_path(Path::new("a.yml")).unwrap(),
            InputFormat::Yaml
        );
        assert_eq!(
            InputFormat::from_path(Path::new("a.yaml")).unwrap(),
            InputFormat::Yaml
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("a.adoc")),
            Err(Error::UnsupportedFormat(ext)) if ext == "adoc"
        ));
        assert!(matches!(
            InputFormat::from_path(Path::new("README")),
            Err(Error::UnsupportedFormat(ext)) if ext == "unknown"
        ));
    }

    #[test]
    fn test_render_json() {
        let doc = document_from_json(JSON).unwrap();
        let unwrapped = Reflow::default().render(&doc).unwrap();
        assert_eq!(unwrapped, "== Intro\none two\nthree four five\n");

        let wrapped = Reflow::new(Config::new().wrap(80)).render(&doc).unwrap();
        assert_eq!(wrapped, "== Intro\none two three four five\n");
    }

    #[test]
    fn test_render_yaml() {
        let doc = document_from_yaml(YAML).unwrap();
        assert_eq!(Reflow::default().render(&doc).unwrap(), "alpha beta\n");
    }

    #[test]
    fn test_unsupported_element_is_render_error() {
        let doc = document_from_json(r#"{"elements":[{"type":"footnote"}]}"#).unwrap();
        assert!(matches!(
            Reflow::default().render(&doc),
            Err(Error::Render(scribe::RenderError::UnsupportedElement))
        ));
    }

    #[test]
    fn test_output_path() {
        let reflow = Reflow::new(Config::new().output_dir("out"));
        assert_eq!(
            reflow.output_path(Path::new("docs/cluster.json")),
            Some(PathBuf::from("out/cluster.adoc"))
        );
        assert_eq!(Reflow::default().output_path(Path::new("a.json")), None);

        let reflow = Reflow::new(Config::new().output_dir("out").suffix(".txt"));
        assert_eq!(
            reflow.output_path(Path::new("a.yaml")),
            Some(PathBuf::from("out/a.txt"))
        );
    }

    #[test]
    fn test_render_all_keeps_order_and_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        let yaml = dir.path().join("other.yaml");
        fs::write(&good, JSON).unwrap();
        fs::write(&bad, "{not json").unwrap();
        fs::write(&yaml, YAML).unwrap();

        let inputs = vec![good.clone(), bad.clone(), yaml.clone()];
        let results = Reflow::default().render_all(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].input, good);
        assert!(results[0].result.is_ok());
        assert_eq!(results[1].input, bad);
        assert!(matches!(results[1].result, Err(Error::Json(_))));
        assert_eq!(results[2].input, yaml);
        assert_eq!(results[2].result.as_deref().unwrap(), "alpha beta\n");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_document("does/not/exist.json"),
            Err(Error::Io(_))
        ));
    }
}
