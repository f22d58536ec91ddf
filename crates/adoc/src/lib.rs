#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Adoc
//!
//! The element tree for parsed AsciiDoc specification documents.
//!
//! A parser produces a [`Document`]: a list of [`Element`]s, each either an
//! inline span (text, formatting, anchors, cross-references), a block
//! (sections, paragraphs, list items, delimited blocks, tables) or a
//! directive (attribute entries, conditionals, includes, comments).
//! Renderers walk this tree; nothing here knows how to print it.
//!
//! The tree is serde-(de)serializable so that documents parsed elsewhere can
//! be handed over as JSON or YAML:
//!
//! ```rust
//! use adoc::{Document, Element};
//!
//! let json = r#"{"elements": [{"type": "text", "text": "Hello"}, {"type": "new_line"}]}"#;
//! let doc: Document = serde_json::from_str(json).unwrap();
//! assert_eq!(doc.elements[0], Element::text("Hello"));
//! ```
//!
//! Unknown element types deserialize to [`Element::Unsupported`] rather than
//! failing, so the decision about what to do with them belongs to the
//! renderer.

mod attribute;
mod element;
mod table;

pub use attribute::Attribute;
pub use element::{
    Admonition, Anchor, AttributeEntry, BlockContent, BlockKind, Conditional, ConditionalKind,
    Counter, CrossReference, DelimitedBlock, DescriptionItem, Document, Element, FormatKind,
    Formatted, Image, Include, Link, ListItem, ListKind, Paragraph, ReferenceForm, Section, Union,
};
pub use table::{
    CellFormat, CellStyle, ColumnWidth, HorizontalAlign, Span, Table, TableCell, TableColumn,
    TableRow, VerticalAlign,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Attribute, CellFormat, CellStyle, Document, Element, HorizontalAlign, Paragraph, Section,
        Span, Table, TableCell, TableColumn, TableRow, VerticalAlign,
    };
}
