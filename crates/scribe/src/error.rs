//! Render errors.

use thiserror::Error;

/// Errors raised while rendering an element tree.
///
/// Either error aborts the render; no partial output is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The tree contains an element kind the renderer cannot emit.
    #[error("unsupported element")]
    UnsupportedElement,

    /// A table row expands past the table's column count.
    #[error("table row {row} needs {required} columns but the table has {columns}")]
    ColumnOverflow {
        row: usize,
        columns: usize,
        required: usize,
    },
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
