#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Scribe
//!
//! Renders a parsed AsciiDoc element tree back into canonical source text.
//!
//! Scribe provides:
//! - A [`Target`] abstraction with an unwrapped and a word-wrapping
//!   implementation
//! - A wrap engine that reflows hard-wrapped source text to a wrap column,
//!   keeping anchors, references and other macros in one piece
//! - Table layout that aligns every cell delimiter of a column across rows
//!
//! ## Example
//!
//! ```rust
//! use adoc::{Document, Element, Paragraph};
//! use scribe::Renderer;
//!
//! let doc = Document::new(vec![
//!     Paragraph::new(vec![
//!         Element::text("A paragraph that was\n"),
//!         Element::text("hard-wrapped in the source.\n"),
//!     ])
//!     .into(),
//! ]);
//!
//! let output = Renderer::new().with_wrap(80).render(&doc).unwrap();
//! assert_eq!(output, "A paragraph that was hard-wrapped in the source.\n");
//! ```
//!
//! A wrap column of `0` renders through an [`UnwrappedTarget`] and
//! reproduces the source line structure as written.

mod attributes;
mod block;
mod error;
mod inline;
mod render;
pub mod table;
mod target;
mod wrap;

use adoc::{Document, Element};
use tracing::debug;

pub use error::{RenderError, Result};
pub use table::{LayoutCell, LayoutRow, TableLayout, is_directive};
pub use target::{Target, UnwrappedTarget};
pub use wrap::WrappedTarget;

use render::RenderContext;

/// Options for the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererOptions {
    /// Wrap column. `0` disables wrapping.
    pub wrap: usize,
}

/// Renders element trees to AsciiDoc text.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RendererOptions,
}

impl Renderer {
    /// Creates a renderer that does not wrap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer from options.
    #[must_use]
    pub fn with_options(options: RendererOptions) -> Self {
        Self { options }
    }

    /// Sets the wrap column. `0` disables wrapping.
    #[must_use]
    pub fn with_wrap(mut self, wrap: usize) -> Self {
        self.options.wrap = wrap;
        self
    }

    /// Returns the renderer options.
    #[must_use]
    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    /// Renders a document and applies [`finish_output`].
    pub fn render(&self, document: &Document) -> Result<String> {
        self.render_elements(&document.elements)
    }

    /// Renders elements and applies [`finish_output`].
    pub fn render_elements(&self, elements: &[Element]) -> Result<String> {
        let raw = self.render_raw(elements)?;
        let output = finish_output(&raw);
        debug!(
            wrap = self.options.wrap,
            elements = elements.len(),
            bytes = output.len(),
            "rendered document"
        );
        Ok(output)
    }

    /// Renders elements and returns the target text as is.
    pub fn render_raw(&self, elements: &[Element]) -> Result<String> {
        debug!(wrap = self.options.wrap, elements = elements.len(), "rendering");
        if self.options.wrap == 0 {
            render_with(UnwrappedTarget::new(), elements)
        } else {
            render_with(WrappedTarget::new(self.options.wrap), elements)
        }
    }
}

/// Renders elements through a caller-supplied target.
pub fn render_with<T: Target>(target: T, elements: &[Element]) -> Result<String> {
    let mut cx = RenderContext::new(target);
    cx.elements(elements)?;
    Ok(cx.finish())
}

/// Renders a document at the given wrap column.
pub fn render(document: &Document, wrap: usize) -> Result<String> {
    Renderer::new().with_wrap(wrap).render(document)
}

/// Strips spaces and tabs before every newline and ends the text with
/// exactly one newline. Output with no content stays empty.
#[must_use]
pub fn finish_output(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    for line in text.split('\n') {
        out.push_str(line.trim_end_matches([' ', '\t']));
        out.push('\n');
    }
    let content = out.trim_end_matches('\n').len();
    out.truncate(content);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        RenderError, Renderer, RendererOptions, Target, UnwrappedTarget, WrappedTarget,
        finish_output, render,
    };
}
