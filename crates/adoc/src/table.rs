//! Table model: rows, cells, and the cell/column specifier notation.
//!
//! AsciiDoc describes per-cell and per-column formatting with a compact
//! prefix notation. A cell specifier sits directly before the cell
//! delimiter:
//!
//! ```text
//! 2+^.>m| spans two columns, centered, bottom aligned, monospace
//! 3*|     the same cell repeated three times
//! ```
//!
//! Column specifiers appear in the `cols` attribute and add a width:
//! `cols="1,2a,^.^3~"`. The [`Display`](std::fmt::Display) impls here write
//! exactly this notation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::element::Element;

/// A table block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Creates a table from its rows.
    #[must_use]
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            attributes: Vec::new(),
            rows,
        }
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Returns the declared columns with multipliers expanded, one entry per
    /// column. Empty if the table carries no `cols` attribute.
    #[must_use]
    pub fn columns(&self) -> Vec<TableColumn> {
        let Some(declared) = Attribute::find_columns(&self.attributes) else {
            return Vec::new();
        };
        let mut columns = Vec::new();
        for column in declared {
            let count = column.multiplier.unwrap_or(1).max(1);
            let single = TableColumn {
                multiplier: None,
                ..*column
            };
            columns.extend(std::iter::repeat_n(single, count as usize));
        }
        columns
    }

    /// Returns the number of columns.
    ///
    /// The declared count wins; without a `cols` attribute, the span-expanded
    /// width of the first cell row decides.
    #[must_use]
    pub fn column_count(&self) -> usize {
        let declared = self.columns().len();
        if declared > 0 {
            return declared;
        }
        self.rows
            .iter()
            .find_map(|row| match row {
                TableRow::Cells(cells) => Some(cells.iter().map(TableCell::slots).sum()),
                TableRow::Raw(_) => None,
            })
            .unwrap_or(0)
    }

    /// Returns the number of rows, raw rows included.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A table row: either cells, or a raw element (e.g. a directive line)
/// standing between rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRow {
    Cells(Vec<TableCell>),
    Raw(Box<Element>),
}

impl TableRow {
    /// Creates a raw row.
    #[must_use]
    pub fn raw(element: Element) -> Self {
        Self::Raw(Box::new(element))
    }
}

impl From<Vec<TableCell>> for TableRow {
    fn from(cells: Vec<TableCell>) -> Self {
        Self::Cells(cells)
    }
}

/// A single table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// The explicit cell specifier, if the source had one.
    #[serde(default)]
    pub format: Option<CellFormat>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl TableCell {
    /// Creates a cell with no explicit specifier.
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            format: None,
            elements,
        }
    }

    /// Creates a cell holding a single text element.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Element::text(text)])
    }

    /// Sets the cell specifier.
    #[must_use]
    pub fn format(mut self, format: CellFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Number of column slots the cell occupies in its row.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.format.as_ref().map_or(1, CellFormat::slots)
    }
}

// ============================================================================
// Specifier parts
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Left => '<',
            Self::Center => '^',
            Self::Right => '>',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    /// The symbol after the leading `.`.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Top => '<',
            Self::Middle => '^',
            Self::Bottom => '>',
        }
    }
}

/// Cell content style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    /// `a`: the cell holds nested AsciiDoc blocks.
    AsciiDoc,
    Default,
    Emphasis,
    Header,
    Literal,
    Monospace,
    Strong,
    Verse,
}

impl CellStyle {
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::AsciiDoc => 'a',
            Self::Default => 'd',
            Self::Emphasis => 'e',
            Self::Header => 'h',
            Self::Literal => 'l',
            Self::Monospace => 'm',
            Self::Strong => 's',
            Self::Verse => 'v',
        }
    }

    /// Parses a style letter.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'a' => Self::AsciiDoc,
            'd' => Self::Default,
            'e' => Self::Emphasis,
            'h' => Self::Header,
            'l' => Self::Literal,
            'm' => Self::Monospace,
            's' => Self::Strong,
            'v' => Self::Verse,
            _ => return None,
        })
    }
}

fn one() -> u32 {
    1
}

/// Column and row span of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    #[serde(default = "one")]
    pub columns: u32,
    #[serde(default = "one")]
    pub rows: u32,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            columns: 1,
            rows: 1,
        }
    }
}

impl Span {
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Returns true if the cell covers a single slot.
    #[must_use]
    pub fn is_single(self) -> bool {
        self.columns <= 1 && self.rows <= 1
    }
}

// ============================================================================
// Cell specifier
// ============================================================================

/// A cell specifier, e.g. `2+^m`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellFormat {
    /// Duplication factor (`3*`).
    #[serde(default)]
    pub multiplier: Option<u32>,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub horizontal_align: Option<HorizontalAlign>,
    #[serde(default)]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(default)]
    pub style: Option<CellStyle>,
}

impl CellFormat {
    /// Creates an empty specifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    #[must_use]
    pub fn col_span(mut self, columns: u32) -> Self {
        self.span.columns = columns;
        self
    }

    #[must_use]
    pub fn row_span(mut self, rows: u32) -> Self {
        self.span.rows = rows;
        self
    }

    #[must_use]
    pub fn horizontal_align(mut self, align: HorizontalAlign) -> Self {
        self.horizontal_align = Some(align);
        self
    }

    #[must_use]
    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
        self
    }

    #[must_use]
    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Number of column slots a cell with this specifier occupies.
    #[must_use]
    pub fn slots(&self) -> usize {
        let multiplier = self.multiplier.unwrap_or(1).max(1) as usize;
        let columns = self.span.columns.max(1) as usize;
        multiplier * columns
    }

    /// Returns true if this specifier renders as the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.multiplier.is_none()
            && self.span.is_single()
            && self.horizontal_align.is_none()
            && self.vertical_align.is_none()
            && self.style.is_none()
    }

    /// Fills unset alignment and style from a column default.
    ///
    /// Values set on the cell always win; span and multiplier belong to the
    /// cell alone.
    #[must_use]
    pub fn inherit(&self, column: &TableColumn) -> Self {
        Self {
            multiplier: self.multiplier,
            span: self.span,
            horizontal_align: self.horizontal_align.or(column.horizontal_align),
            vertical_align: self.vertical_align.or(column.vertical_align),
            style: self.style.or(column.style),
        }
    }

    /// Returns true if the cell content is nested AsciiDoc.
    #[must_use]
    pub fn is_asciidoc(&self) -> bool {
        self.style == Some(CellStyle::AsciiDoc)
    }
}

impl fmt::Display for CellFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(multiplier) = self.multiplier {
            write!(f, "{multiplier}*")?;
        }
        match (self.span.columns.max(1), self.span.rows.max(1)) {
            (1, 1) => {}
            (columns, 1) => write!(f, "{columns}+")?,
            (1, rows) => write!(f, ".{rows}+")?,
            (columns, rows) => write!(f, "{columns}.{rows}+")?,
        }
        write_alignment(f, self.horizontal_align, self.vertical_align)?;
        if let Some(style) = self.style {
            write!(f, "{}", style.letter())?;
        }
        Ok(())
    }
}

fn write_alignment(
    f: &mut fmt::Formatter<'_>,
    horizontal: Option<HorizontalAlign>,
    vertical: Option<VerticalAlign>,
) -> fmt::Result {
    if let Some(align) = horizontal {
        write!(f, "{}", align.symbol())?;
    }
    if let Some(align) = vertical {
        write!(f, ".{}", align.symbol())?;
    }
    Ok(())
}

// ============================================================================
// Column specifier
// ============================================================================

/// Relative width of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Proportional weight, `2`.
    Proportional(u32),
    /// Percentage, `25%`.
    Percent(u32),
    /// Autowidth, `~`.
    Auto,
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proportional(weight) => write!(f, "{weight}"),
            Self::Percent(percent) => write!(f, "{percent}%"),
            Self::Auto => f.write_str("~"),
        }
    }
}

/// One entry of a `cols` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableColumn {
    #[serde(default)]
    pub multiplier: Option<u32>,
    #[serde(default)]
    pub horizontal_align: Option<HorizontalAlign>,
    #[serde(default)]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(default)]
    pub width: Option<ColumnWidth>,
    #[serde(default)]
    pub style: Option<CellStyle>,
}

impl TableColumn {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    #[must_use]
    pub fn horizontal_align(mut self, align: HorizontalAlign) -> Self {
        self.horizontal_align = Some(align);
        self
    }

    #[must_use]
    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
        self
    }

    #[must_use]
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }
}

impl fmt::Display for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(multiplier) = self.multiplier {
            write!(f, "{multiplier}*")?;
        }
        write_alignment(f, self.horizontal_align, self.vertical_align)?;
        if let Some(width) = self.width {
            write!(f, "{width}")?;
        }
        if let Some(style) = self.style {
            write!(f, "{}", style.letter())?;
        }
        Ok(())
    }
}
