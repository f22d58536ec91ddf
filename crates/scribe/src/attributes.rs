//! Attribute list emitters.
//!
//! Block attributes go on their own lines before the block:
//!
//! ```text
//! [[ref_Id]]
//! .Title
//! [style,positional,name=value,cols="1,2a"]
//! ```
//!
//! Macros (images, includes) carry an inline list instead, where the id
//! and title become `id=` and `title=` entries.

use std::borrow::Cow;

use adoc::Attribute;

use crate::error::Result;
use crate::render::RenderContext;
use crate::target::Target;

impl<T: Target> RenderContext<T> {
    pub(crate) fn block_attributes(&mut self, attributes: &[Attribute]) -> Result<()> {
        if attributes.is_empty() {
            return Ok(());
        }
        let mut id = None;
        let mut title = None;
        let mut entries = Vec::new();
        for attribute in attributes {
            match attribute {
                Attribute::Id { id: value } => id = Some(value.as_str()),
                Attribute::Title { elements } => title = Some(self.label_text(elements)?),
                other => entries.extend(list_entry(other)),
            }
        }

        self.target.ensure_newline();
        self.unwrapped(|cx| {
            if let Some(id) = id {
                cx.target.write_str("[[");
                cx.target.write_str(id);
                cx.target.write_str("]]\n");
            }
            if let Some(title) = &title {
                cx.target.write_char('.');
                cx.target.write_str(title);
                cx.target.write_char('\n');
            }
            if !entries.is_empty() {
                cx.target.write_char('[');
                cx.target.write_str(&entries.join(","));
                cx.target.write_str("]\n");
            }
            Ok(())
        })
    }

    /// Builds the bracketed attribute list of a macro, `[]` when empty.
    pub(crate) fn inline_attributes(&self, attributes: &[Attribute]) -> Result<String> {
        let mut entries = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            match attribute {
                Attribute::Id { id } => entries.push(format!("id={}", quote_value(id))),
                Attribute::Title { elements } => {
                    let title = self.label_text(elements)?;
                    entries.push(format!("title={}", quote_value(&title)));
                }
                other => entries.extend(list_entry(other)),
            }
        }
        Ok(format!("[{}]", entries.join(",")))
    }
}

fn list_entry(attribute: &Attribute) -> Option<String> {
    match attribute {
        Attribute::Style { name } => Some(name.clone()),
        Attribute::Positional { value } => Some(quote_value(value).into_owned()),
        Attribute::Named { name, value } => Some(format!("{name}={}", quote_value(value))),
        Attribute::Columns { columns } => {
            let specs: Vec<String> = columns.iter().map(ToString::to_string).collect();
            Some(format!("cols=\"{}\"", specs.join(",")))
        }
        Attribute::Id { .. } | Attribute::Title { .. } => None,
    }
}

/// Double-quotes a value that would otherwise break the attribute list.
pub(crate) fn quote_value(value: &str) -> Cow<'_, str> {
    if value.is_empty() || value.contains([' ', ',', '"', ']']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\\\"")))
    } else {
        Cow::Borrowed(value)
    }
}
