//! Block and macro attributes.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::table::TableColumn;

/// A single attribute attached to a block or a macro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attribute {
    /// Block id, `[[id]]` or `id=`.
    Id { id: String },
    /// Block title, `.Title`.
    Title { elements: Vec<Element> },
    /// First positional attribute naming the block style (`source`, `NOTE`, ...).
    Style { name: String },
    /// Any other positional attribute.
    Positional { value: String },
    /// `name=value`
    Named { name: String, value: String },
    /// Table column specifiers, `cols="..."`.
    Columns { columns: Vec<TableColumn> },
}

impl Attribute {
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id { id: id.into() }
    }

    #[must_use]
    pub fn title(elements: Vec<Element>) -> Self {
        Self::Title { elements }
    }

    #[must_use]
    pub fn style(name: impl Into<String>) -> Self {
        Self::Style { name: name.into() }
    }

    #[must_use]
    pub fn positional(value: impl Into<String>) -> Self {
        Self::Positional {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn columns(columns: Vec<TableColumn>) -> Self {
        Self::Columns { columns }
    }

    /// Finds the column specifiers among a list of attributes.
    #[must_use]
    pub fn find_columns(attributes: &[Self]) -> Option<&[TableColumn]> {
        attributes.iter().find_map(|attribute| match attribute {
            Self::Columns { columns } => Some(columns.as_slice()),
            _ => None,
        })
    }
}
