//! Table layout and emission.
//!
//! Every cell is first rendered into a detached sub-target, so its exact
//! text and width are known before anything is written. Rows are then
//! expanded into one slot per column (spanned and row-reserved slots are
//! blank), and a column offset is computed so that every cell delimiter of
//! a column lines up across all rows:
//!
//! ```text
//! |===
//! | ID             | Name
//! | LongIdentifier | Other
//! |===
//! ```
//!
//! Offsets are found in two passes. The first pass walks each row on its
//! own; the second reconciles the rows column by column, left to right,
//! pushing every column to the widest requirement and shifting the rest of
//! the row along with it.

use adoc::{CellFormat, Element, Table, TableCell, TableColumn, TableRow};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;
use unicode_width::UnicodeWidthStr;

use crate::error::{RenderError, Result};
use crate::render::RenderContext;
use crate::target::Target;

/// Conditional preprocessor directives that must stay at the start of a line.
static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:ifn?def|ifeval|endif)::\S*\[.*\]\s*$").expect("directive regex is valid")
});

/// Returns true if `line` is a conditional preprocessor directive.
#[must_use]
pub fn is_directive(line: &str) -> bool {
    DIRECTIVE.is_match(line)
}

// ============================================================================
// Layout model
// ============================================================================

/// A cell slot after rendering, ready for layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutCell {
    /// Rendered and trimmed cell text.
    pub value: String,
    /// The explicit cell specifier, written before the delimiter.
    pub formatter: String,
    /// The cell holds nested AsciiDoc; its lines are emitted untouched.
    pub raw: bool,
    /// The slot is covered by a span from another cell.
    pub blank: bool,
    /// Printed width of the last line of `value`.
    pub width: usize,
    /// The next cell of the row must start on a new line.
    pub breaks_after: bool,
}

impl LayoutCell {
    /// Creates a cell from its rendered text.
    #[must_use]
    pub fn new(value: impl Into<String>, formatter: impl Into<String>, raw: bool) -> Self {
        let value = value.into();
        let last_line = value.rsplit('\n').next().unwrap_or_default();
        let multiline = value.contains('\n');
        let width = if raw && multiline {
            0
        } else {
            last_line.trim().width()
        };
        let breaks_after = (raw && multiline) || is_directive(last_line);
        Self {
            value,
            formatter: formatter.into(),
            raw,
            blank: false,
            width,
            breaks_after,
        }
    }

    /// Creates a blank slot.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            blank: true,
            ..Self::default()
        }
    }

    /// Printed width of the formatter.
    #[must_use]
    pub fn formatter_width(&self) -> usize {
        self.formatter.width()
    }

    /// Width the cell occupies after its delimiter: content plus one space
    /// on each side, or nothing for an empty cell.
    #[must_use]
    pub fn padded_width(&self) -> usize {
        if self.width > 0 { self.width + 2 } else { 0 }
    }
}

/// One row of a laid-out table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutRow<'a> {
    /// Exactly one slot per column.
    Cells(Vec<LayoutCell>),
    /// An element emitted between rows as-is.
    Raw(&'a Element),
}

/// A table with every cell rendered and measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout<'a> {
    columns: usize,
    rows: Vec<LayoutRow<'a>>,
}

impl<'a> TableLayout<'a> {
    /// Creates an empty layout with `columns` columns.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[LayoutRow<'a>] {
        &self.rows
    }

    /// Appends a row of cell slots.
    pub fn push_cells(&mut self, cells: Vec<LayoutCell>) {
        self.rows.push(LayoutRow::Cells(cells));
    }

    /// Appends a raw row.
    pub fn push_raw(&mut self, element: &'a Element) {
        self.rows.push(LayoutRow::Raw(element));
    }

    /// Computes the delimiter offset of every column. Columns that are blank
    /// in every row have no offset.
    #[must_use]
    pub fn column_offsets(&self) -> Vec<Option<usize>> {
        let mut rows: Vec<Vec<Option<usize>>> = self
            .rows
            .iter()
            .filter_map(|row| match row {
                LayoutRow::Cells(cells) => Some(row_offsets(cells)),
                LayoutRow::Raw(_) => None,
            })
            .collect();
        reconcile_offsets(&mut rows, self.columns)
    }
}

// ============================================================================
// Offset computation
// ============================================================================

/// First pass: delimiter offsets of one row on its own, `None` for blank
/// slots.
#[must_use]
pub fn row_offsets(cells: &[LayoutCell]) -> Vec<Option<usize>> {
    let mut offsets = Vec::with_capacity(cells.len());
    let mut next = 0;
    for cell in cells {
        if cell.blank {
            offsets.push(None);
            continue;
        }
        let offset = next + cell.formatter_width();
        offsets.push(Some(offset));
        next = if cell.breaks_after {
            0
        } else {
            offset + 1 + cell.padded_width()
        };
    }
    offsets
}

/// Second pass: moves every column to the largest offset any row needs and
/// shifts the remainder of each row that had to move. Returns the final
/// offset per column.
pub fn reconcile_offsets(
    rows: &mut [Vec<Option<usize>>],
    columns: usize,
) -> Vec<Option<usize>> {
    let mut result = vec![None; columns];
    for (column, slot) in result.iter_mut().enumerate() {
        let Some(max) = rows
            .iter()
            .filter_map(|row| row.get(column).copied().flatten())
            .max()
        else {
            continue;
        };
        *slot = Some(max);
        for row in rows.iter_mut() {
            let Some(own) = row.get(column).copied().flatten() else {
                continue;
            };
            if own < max {
                let shift = max - own;
                for offset in row[column..].iter_mut().flatten() {
                    *offset += shift;
                }
            }
        }
    }
    result
}

// ============================================================================
// Emission
// ============================================================================

fn pad(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}

/// Writes one row of cells aligned to `offsets`, ending with a newline.
/// A row with no cells writes nothing.
pub fn render_row(
    cells: &[LayoutCell],
    offsets: &[Option<usize>],
    delimiter: char,
    out: &mut String,
) {
    let mut position = 0;
    let mut wrote_any = false;
    let mut force_break = false;
    for (index, cell) in cells.iter().enumerate() {
        if cell.blank {
            continue;
        }
        let Some(offset) = offsets.get(index).copied().flatten() else {
            continue;
        };
        let start = offset.saturating_sub(cell.formatter_width());
        if wrote_any && (force_break || position > start) {
            out.push('\n');
            position = 0;
        }
        pad(out, start - position);
        out.push_str(&cell.formatter);
        out.push(delimiter);
        position = write_value(cell, offset, out, offset + 1);
        wrote_any = true;
        force_break = cell.breaks_after;
    }
    if wrote_any {
        out.push('\n');
    }
}

/// Writes the value of a cell whose delimiter sits at `offset`. Returns the
/// position on the current line afterwards.
fn write_value(cell: &LayoutCell, offset: usize, out: &mut String, mut position: usize) -> usize {
    if cell.value.is_empty() {
        return position;
    }
    if cell.raw && cell.value.contains('\n') {
        out.push(' ');
        out.push_str(&cell.value);
        return cell
            .value
            .rsplit('\n')
            .next()
            .map_or(0, UnicodeWidthStr::width);
    }

    let content = offset + 2;
    let mut lines = cell.value.split('\n');
    let first = lines.next().unwrap_or_default();
    if is_directive(first) {
        out.push('\n');
        out.push_str(first.trim());
        position = first.trim().width();
    } else {
        out.push(' ');
        out.push_str(first);
        position += 1 + first.width();
    }
    for line in lines {
        out.push('\n');
        if cell.raw {
            out.push_str(line);
            position = line.width();
            continue;
        }
        let line = line.trim();
        if line.is_empty() {
            position = 0;
        } else if is_directive(line) {
            out.push_str(line);
            position = line.width();
        } else {
            pad(out, content);
            out.push_str(line);
            position = content + line.width();
        }
    }
    position
}

// ============================================================================
// Rendering tables through a target
// ============================================================================

impl<T: Target> RenderContext<T> {
    pub(crate) fn table(&mut self, table: &Table) -> Result<()> {
        let delimiter = if self.table_depth > 0 { '!' } else { '|' };
        let layout = self.layout_table(table)?;
        let offsets = layout.column_offsets();
        trace!(
            columns = layout.column_count(),
            rows = layout.rows().len(),
            ?offsets,
            "table layout"
        );

        self.target.ensure_newline();
        self.block_attributes(&table.attributes)?;
        self.unwrapped(|cx| {
            let fence = format!("{delimiter}===\n");
            cx.target.write_str(&fence);
            for row in layout.rows() {
                match row {
                    LayoutRow::Cells(cells) => {
                        let mut line = String::new();
                        render_row(cells, &offsets, delimiter, &mut line);
                        cx.target.write_str(&line);
                    }
                    LayoutRow::Raw(element) => {
                        cx.element(element)?;
                        cx.target.ensure_newline();
                    }
                }
            }
            cx.target.write_str(&fence);
            Ok(())
        })
    }

    /// Renders every cell and expands each row into one slot per column.
    fn layout_table<'a>(&self, table: &'a Table) -> Result<TableLayout<'a>> {
        let columns = table.columns();
        let count = table.column_count();
        let mut layout = TableLayout::new(count);
        // Remaining rows each column is reserved for by a row span.
        let mut reserved = vec![0u32; count];
        for (index, row) in table.rows.iter().enumerate() {
            match row {
                TableRow::Raw(element) => layout.push_raw(element),
                TableRow::Cells(cells) => {
                    let slots = self.layout_row(cells, &columns, &mut reserved, index)?;
                    layout.push_cells(slots);
                }
            }
        }
        Ok(layout)
    }

    fn layout_row(
        &self,
        cells: &[TableCell],
        columns: &[TableColumn],
        reserved: &mut [u32],
        row: usize,
    ) -> Result<Vec<LayoutCell>> {
        let count = reserved.len();
        let mut taken: Vec<bool> = reserved.iter().map(|&rows| rows > 0).collect();
        for rows in reserved.iter_mut() {
            *rows = rows.saturating_sub(1);
        }

        let mut slots: Vec<Option<LayoutCell>> = vec![None; count];
        let mut column = 0;
        for cell in cells {
            while column < count && taken[column] {
                column += 1;
            }
            let format = cell.format.unwrap_or_default();
            let width = format.slots();
            if column + width > count {
                return Err(RenderError::ColumnOverflow {
                    row,
                    columns: count,
                    required: column + width,
                });
            }

            let effective = columns
                .get(column)
                .map_or(format, |declared| format.inherit(declared));
            let value = self.cell_text(cell, &effective)?;
            let formatter = cell.format.map(|f| f.to_string()).unwrap_or_default();
            slots[column] = Some(LayoutCell::new(value, formatter, effective.is_asciidoc()));

            for slot in column..column + width {
                taken[slot] = true;
                if format.span.rows > 1 {
                    reserved[slot] = reserved[slot].max(format.span.rows - 1);
                }
            }
            column += width;
        }
        Ok(slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(LayoutCell::blank))
            .collect())
    }

    /// Renders a cell into a sub-target. AsciiDoc cells keep their leading
    /// whitespace.
    fn cell_text(&self, cell: &TableCell, format: &CellFormat) -> Result<String> {
        let text = self.measure_nested(&cell.elements, self.table_depth + 1)?;
        Ok(if format.is_asciidoc() {
            text.trim_end().to_string()
        } else {
            text.trim().to_string()
        })
    }
}
