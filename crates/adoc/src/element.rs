//! Element kinds of a parsed AsciiDoc document.
//!
//! Every node of the tree is an [`Element`]. Small inline kinds carry their
//! payload directly in the variant; blocks and anything with more than a
//! couple of fields wrap a dedicated struct with its own builder.

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::table::Table;

/// A parsed document: the root of the element tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Top-level elements in source order.
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Document {
    /// Creates a document from its top-level elements.
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Returns true if the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    // ========================================================================
    // Inline
    // ========================================================================
    /// Plain text, possibly containing source newlines.
    Text { text: String },
    /// A source line ending.
    NewLine,
    /// A blank line separating blocks.
    EmptyLine,
    /// A hard line break (` +` at end of line).
    LineBreak,
    Formatted(Formatted),
    Anchor(Anchor),
    CrossReference(CrossReference),
    Link(Link),
    /// `{name}`
    AttributeReference { name: String },
    Counter(Counter),
    /// Inline passthrough, emitted as `pass:[text]`.
    Passthrough { text: String },
    /// Inline or block image macro.
    Image(Image),

    // ========================================================================
    // Blocks
    // ========================================================================
    Section(Section),
    Paragraph(Paragraph),
    ListItem(ListItem),
    DescriptionItem(DescriptionItem),
    /// A lone `+` attaching the next block to the preceding list item.
    ListContinuation,
    DelimitedBlock(DelimitedBlock),
    Table(Table),
    /// `'''`
    HorizontalRule,
    /// `<<<`
    PageBreak,

    // ========================================================================
    // Directives
    // ========================================================================
    AttributeEntry(AttributeEntry),
    /// `:name!:`
    AttributeReset { name: String },
    /// A single-line `//` comment.
    Comment { text: String },
    Conditional(Conditional),
    /// `ifeval::[expression]`
    IfEval { expression: String },
    /// `endif::names[]`
    EndIf {
        #[serde(default)]
        names: Vec<String>,
    },
    Include(Include),

    /// An element kind this model does not know about.
    #[serde(other)]
    Unsupported,
}

impl Element {
    /// Creates a text element.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an attribute reference (`{name}`).
    #[must_use]
    pub fn attribute_reference(name: impl Into<String>) -> Self {
        Self::AttributeReference { name: name.into() }
    }

    /// Creates a single-line comment.
    #[must_use]
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    /// Creates an `endif::` directive closing the given names.
    #[must_use]
    pub fn end_if<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::EndIf {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the snake_case name of this element kind, as used in the
    /// serialized `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::NewLine => "new_line",
            Self::EmptyLine => "empty_line",
            Self::LineBreak => "line_break",
            Self::Formatted(_) => "formatted",
            Self::Anchor(_) => "anchor",
            Self::CrossReference(_) => "cross_reference",
            Self::Link(_) => "link",
            Self::AttributeReference { .. } => "attribute_reference",
            Self::Counter(_) => "counter",
            Self::Passthrough { .. } => "passthrough",
            Self::Image(_) => "image",
            Self::Section(_) => "section",
            Self::Paragraph(_) => "paragraph",
            Self::ListItem(_) => "list_item",
            Self::DescriptionItem(_) => "description_item",
            Self::ListContinuation => "list_continuation",
            Self::DelimitedBlock(_) => "delimited_block",
            Self::Table(_) => "table",
            Self::HorizontalRule => "horizontal_rule",
            Self::PageBreak => "page_break",
            Self::AttributeEntry(_) => "attribute_entry",
            Self::AttributeReset { .. } => "attribute_reset",
            Self::Comment { .. } => "comment",
            Self::Conditional(_) => "conditional",
            Self::IfEval { .. } => "if_eval",
            Self::EndIf { .. } => "end_if",
            Self::Include(_) => "include",
            Self::Unsupported => "unsupported",
        }
    }

    /// Returns the child elements of this element, if it has any.
    ///
    /// Labels, titles and table cells are not children in this sense.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        match self {
            Self::Formatted(f) => &f.elements,
            Self::Section(s) => &s.elements,
            Self::Paragraph(p) => &p.elements,
            Self::ListItem(l) => &l.elements,
            Self::DescriptionItem(d) => &d.elements,
            Self::DelimitedBlock(DelimitedBlock {
                content: BlockContent::Elements(elements),
                ..
            }) => elements,
            _ => &[],
        }
    }
}

macro_rules! impl_from_payload {
    ($($payload:ident),* $(,)?) => {
        $(
            impl From<$payload> for Element {
                fn from(value: $payload) -> Self {
                    Self::$payload(value)
                }
            }
        )*
    };
}

impl_from_payload!(
    Formatted,
    Anchor,
    CrossReference,
    Link,
    Counter,
    Image,
    Section,
    Paragraph,
    ListItem,
    DescriptionItem,
    DelimitedBlock,
    Table,
    AttributeEntry,
    Conditional,
    Include,
);

// ============================================================================
// Inline payloads
// ============================================================================

/// Inline formatting kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    Bold,
    Italic,
    Monospace,
    Marked,
    Superscript,
    Subscript,
}

impl FormatKind {
    /// The delimiter character for this kind.
    #[must_use]
    pub fn delimiter(self) -> char {
        match self {
            Self::Bold => '*',
            Self::Italic => '_',
            Self::Monospace => '`',
            Self::Marked => '#',
            Self::Superscript => '^',
            Self::Subscript => '~',
        }
    }

    /// Whether the kind has a doubled (unconstrained) form.
    #[must_use]
    pub fn has_unconstrained_form(self) -> bool {
        !matches!(self, Self::Superscript | Self::Subscript)
    }
}

/// A formatted span such as `*bold*` or `__italic__`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatted {
    pub kind: FormatKind,
    /// Doubled delimiters, allowed to appear mid-word.
    #[serde(default)]
    pub unconstrained: bool,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Formatted {
    /// Creates a constrained span of the given kind.
    #[must_use]
    pub fn new(kind: FormatKind, elements: Vec<Element>) -> Self {
        Self {
            kind,
            unconstrained: false,
            elements,
        }
    }

    /// Sets the unconstrained (doubled delimiter) form.
    #[must_use]
    pub fn unconstrained(mut self, unconstrained: bool) -> Self {
        self.unconstrained = unconstrained;
        self
    }
}

/// An inline anchor `[[id]]` or `[[id,label]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: String,
    #[serde(default)]
    pub label: Vec<Element>,
}

impl Anchor {
    /// Creates an anchor without a label.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Vec::new(),
        }
    }

    /// Sets the reference label.
    #[must_use]
    pub fn label(mut self, label: Vec<Element>) -> Self {
        self.label = label;
        self
    }
}

/// Syntax used for a cross-reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceForm {
    /// `<<id,label>>`
    #[default]
    Shorthand,
    /// `xref:id[label]`
    Macro,
}

/// A cross-reference to an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub id: String,
    #[serde(default)]
    pub label: Vec<Element>,
    #[serde(default)]
    pub form: ReferenceForm,
}

impl CrossReference {
    /// Creates a shorthand cross-reference without a label.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Vec::new(),
            form: ReferenceForm::Shorthand,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: Vec<Element>) -> Self {
        self.label = label;
        self
    }

    /// Sets the reference syntax.
    #[must_use]
    pub fn form(mut self, form: ReferenceForm) -> Self {
        self.form = form;
        self
    }
}

/// A URL, optionally with a label and the `link:` macro prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default)]
    pub label: Option<Vec<Element>>,
    #[serde(default)]
    pub macro_form: bool,
}

impl Link {
    /// Creates a bare URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: None,
            macro_form: false,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: Vec<Element>) -> Self {
        self.label = Some(label);
        self
    }

    /// Uses the `link:url[label]` form.
    #[must_use]
    pub fn macro_form(mut self, macro_form: bool) -> Self {
        self.macro_form = macro_form;
        self
    }
}

/// A counter reference, `{counter:name}` or `{counter2:name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub name: String,
    #[serde(default)]
    pub initial: Option<String>,
    /// Increments without displaying (`counter2`).
    #[serde(default)]
    pub hidden: bool,
}

impl Counter {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: None,
            hidden: false,
        }
    }

    #[must_use]
    pub fn initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = Some(initial.into());
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// An image macro: `image:path[...]` inline or `image::path[...]` as a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub path: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub block: bool,
}

impl Image {
    /// Creates an inline image.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attributes: Vec::new(),
            block: false,
        }
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Makes this a block image.
    #[must_use]
    pub fn block(mut self, block: bool) -> Self {
        self.block = block;
        self
    }
}

// ============================================================================
// Block payloads
// ============================================================================

/// A section heading and the elements under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// 0 for the document title, 1 for `==`, and so on.
    pub level: u8,
    pub title: Vec<Element>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Section {
    #[must_use]
    pub fn new(level: u8, title: Vec<Element>) -> Self {
        Self {
            level,
            title,
            attributes: Vec::new(),
            elements: Vec::new(),
        }
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }
}

/// Admonition label that prefixes a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Admonition {
    Note,
    Tip,
    Important,
    Caution,
    Warning,
}

impl Admonition {
    /// The label as written in source, e.g. `NOTE`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "NOTE",
            Self::Tip => "TIP",
            Self::Important => "IMPORTANT",
            Self::Caution => "CAUTION",
            Self::Warning => "WARNING",
        }
    }
}

/// A paragraph of inline content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub admonition: Option<Admonition>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Paragraph {
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn admonition(mut self, admonition: Admonition) -> Self {
        self.admonition = Some(admonition);
        self
    }
}

/// Ordered or unordered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    #[default]
    Unordered,
    Ordered,
}

impl ListKind {
    /// Marker used when an item carries none of its own.
    #[must_use]
    pub fn default_marker(self) -> &'static str {
        match self {
            Self::Unordered => "*",
            Self::Ordered => ".",
        }
    }
}

/// A single list item. Nested content attaches through [`Element::ListContinuation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub kind: ListKind,
    /// Marker as written (`*`, `**`, `-`, `.`, `..`); empty means the kind's default.
    #[serde(default)]
    pub marker: String,
    /// Checklist state, if this is a checklist item.
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl ListItem {
    #[must_use]
    pub fn new(kind: ListKind, elements: Vec<Element>) -> Self {
        Self {
            kind,
            elements,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// The marker to emit.
    #[must_use]
    pub fn effective_marker(&self) -> &str {
        if self.marker.is_empty() {
            self.kind.default_marker()
        } else {
            &self.marker
        }
    }
}

fn default_description_marker() -> String {
    "::".to_string()
}

/// A description list entry: `term:: description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionItem {
    pub term: Vec<Element>,
    #[serde(default = "default_description_marker")]
    pub marker: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl DescriptionItem {
    #[must_use]
    pub fn new(term: Vec<Element>, elements: Vec<Element>) -> Self {
        Self {
            term,
            marker: default_description_marker(),
            elements,
        }
    }

    #[must_use]
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

/// Delimited block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Listing,
    Literal,
    Example,
    Sidebar,
    Quote,
    Open,
    Passthrough,
    Comment,
}

impl BlockKind {
    /// The character the delimiter line repeats.
    #[must_use]
    pub fn delimiter_char(self) -> char {
        match self {
            Self::Listing => '-',
            Self::Literal => '.',
            Self::Example => '=',
            Self::Sidebar => '*',
            Self::Quote => '_',
            Self::Open => '-',
            Self::Passthrough => '+',
            Self::Comment => '/',
        }
    }

    /// Builds the delimiter line, honoring the fixed `--` of open blocks.
    #[must_use]
    pub fn delimiter(self, length: Option<usize>) -> String {
        let length = match self {
            Self::Open => 2,
            _ => length.unwrap_or(4).max(4),
        };
        std::iter::repeat_n(self.delimiter_char(), length).collect()
    }

    /// Whether the body is verbatim text that must never be reflowed.
    #[must_use]
    pub fn is_verbatim(self) -> bool {
        matches!(
            self,
            Self::Listing | Self::Literal | Self::Passthrough | Self::Comment
        )
    }
}

/// The body of a delimited block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockContent {
    /// Verbatim source lines.
    Lines(Vec<String>),
    /// Nested elements.
    Elements(Vec<Element>),
}

impl Default for BlockContent {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

/// A delimited block such as a listing or an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimitedBlock {
    pub kind: BlockKind,
    /// Length of the delimiter line when longer than the minimum.
    #[serde(default)]
    pub delimiter_length: Option<usize>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub content: BlockContent,
}

impl DelimitedBlock {
    /// Creates a block holding verbatim lines.
    #[must_use]
    pub fn lines<I, S>(kind: BlockKind, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            delimiter_length: None,
            attributes: Vec::new(),
            content: BlockContent::Lines(lines.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates a block holding nested elements.
    #[must_use]
    pub fn elements(kind: BlockKind, elements: Vec<Element>) -> Self {
        Self {
            kind,
            delimiter_length: None,
            attributes: Vec::new(),
            content: BlockContent::Elements(elements),
        }
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn delimiter_length(mut self, length: usize) -> Self {
        self.delimiter_length = Some(length);
        self
    }
}

// ============================================================================
// Directive payloads
// ============================================================================

/// `:name: value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub name: String,
    #[serde(default)]
    pub value: Vec<Element>,
}

impl AttributeEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// `ifdef` or `ifndef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionalKind {
    #[serde(rename = "ifdef")]
    IfDef,
    #[serde(rename = "ifndef")]
    IfNDef,
}

impl ConditionalKind {
    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            Self::IfDef => "ifdef",
            Self::IfNDef => "ifndef",
        }
    }
}

/// How multiple attribute names of a conditional combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Union {
    /// Any name (`a,b`).
    #[default]
    Any,
    /// All names (`a+b`).
    All,
}

impl Union {
    #[must_use]
    pub fn separator(self) -> char {
        match self {
            Self::Any => ',',
            Self::All => '+',
        }
    }
}

/// `ifdef::names[]`, or the single-line form `ifdef::names[content]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditional {
    pub kind: ConditionalKind,
    pub names: Vec<String>,
    #[serde(default)]
    pub union: Union,
    #[serde(default)]
    pub inline: Option<Vec<Element>>,
}

impl Conditional {
    #[must_use]
    pub fn new<I, S>(kind: ConditionalKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            names: names.into_iter().map(Into::into).collect(),
            union: Union::Any,
            inline: None,
        }
    }

    #[must_use]
    pub fn union(mut self, union: Union) -> Self {
        self.union = union;
        self
    }

    #[must_use]
    pub fn inline(mut self, content: Vec<Element>) -> Self {
        self.inline = Some(content);
        self
    }
}

/// `include::path[attributes]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Include {
    pub path: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Include {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }
}
