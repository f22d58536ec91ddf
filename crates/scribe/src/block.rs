//! Block and directive emitters.

use adoc::{
    AttributeEntry, BlockContent, Conditional, DelimitedBlock, DescriptionItem, Element, Image,
    Include, ListItem, Paragraph, Section,
};

use crate::error::Result;
use crate::render::RenderContext;
use crate::target::Target;

impl<T: Target> RenderContext<T> {
    pub(crate) fn section(&mut self, section: &Section) -> Result<()> {
        self.target.ensure_newline();
        self.block_attributes(&section.attributes)?;
        self.unwrapped(|cx| {
            let marker = "=".repeat(usize::from(section.level) + 1);
            cx.target.write_str(&marker);
            cx.target.write_char(' ');
            cx.elements(&section.title)?;
            cx.target.ensure_newline();
            Ok(())
        })?;
        self.elements(&section.elements)
    }

    pub(crate) fn paragraph(&mut self, paragraph: &Paragraph) -> Result<()> {
        self.target.ensure_newline();
        self.block_attributes(&paragraph.attributes)?;
        if let Some(admonition) = paragraph.admonition {
            self.atomic(|cx| {
                cx.target.write_str(admonition.label());
                cx.target.write_str(": ");
                Ok(())
            })?;
        }
        self.elements(&paragraph.elements)?;
        self.target.ensure_newline();
        Ok(())
    }

    pub(crate) fn list_item(&mut self, item: &ListItem) -> Result<()> {
        self.target.ensure_newline();
        self.block_attributes(&item.attributes)?;
        // The marker must stay on the item's first line.
        self.atomic(|cx| {
            cx.target.write_str(item.effective_marker());
            cx.target.write_char(' ');
            match item.checked {
                Some(true) => cx.target.write_str("[x] "),
                Some(false) => cx.target.write_str("[ ] "),
                None => {}
            }
            Ok(())
        })?;
        self.elements(&item.elements)?;
        self.target.ensure_newline();
        Ok(())
    }

    pub(crate) fn description_item(&mut self, item: &DescriptionItem) -> Result<()> {
        self.target.ensure_newline();
        self.unwrapped(|cx| {
            cx.elements(&item.term)?;
            cx.target.write_str(&item.marker);
            Ok(())
        })?;
        match item.elements.first() {
            None => {}
            Some(Element::NewLine) => {
                self.target.ensure_newline();
                self.elements(&item.elements[1..])?;
            }
            Some(_) => {
                self.target.write_char(' ');
                self.elements(&item.elements)?;
            }
        }
        self.target.ensure_newline();
        Ok(())
    }

    pub(crate) fn delimited_block(&mut self, block: &DelimitedBlock) -> Result<()> {
        let delimiter = block.kind.delimiter(block.delimiter_length);
        self.target.ensure_newline();
        self.block_attributes(&block.attributes)?;
        self.directive_line(|cx| {
            cx.target.write_str(&delimiter);
            Ok(())
        })?;
        match &block.content {
            BlockContent::Lines(lines) => self.unwrapped(|cx| {
                for line in lines {
                    cx.target.write_str(line);
                    cx.target.write_char('\n');
                }
                Ok(())
            })?,
            BlockContent::Elements(elements) if block.kind.is_verbatim() => {
                self.unwrapped(|cx| cx.elements(elements))?;
            }
            BlockContent::Elements(elements) => self.elements(elements)?,
        }
        self.directive_line(|cx| {
            cx.target.write_str(&delimiter);
            Ok(())
        })
    }

    pub(crate) fn block_image(&mut self, image: &Image) -> Result<()> {
        let attributes = self.inline_attributes(&image.attributes)?;
        self.directive_line(|cx| {
            cx.target.write_str("image::");
            cx.target.write_str(&image.path);
            cx.target.write_str(&attributes);
            Ok(())
        })
    }

    // ========================================================================
    // Directives
    // ========================================================================

    pub(crate) fn attribute_entry(&mut self, entry: &AttributeEntry) -> Result<()> {
        self.directive_line(|cx| {
            cx.target.write_char(':');
            cx.target.write_str(&entry.name);
            cx.target.write_char(':');
            if !entry.value.is_empty() {
                cx.target.write_char(' ');
                cx.elements(&entry.value)?;
            }
            Ok(())
        })
    }

    pub(crate) fn conditional(&mut self, conditional: &Conditional) -> Result<()> {
        let separator = conditional.union.separator().to_string();
        self.directive_line(|cx| {
            cx.target.write_str(conditional.kind.directive());
            cx.target.write_str("::");
            cx.target.write_str(&conditional.names.join(&separator));
            cx.target.write_char('[');
            if let Some(content) = &conditional.inline {
                cx.elements(content)?;
            }
            cx.target.write_char(']');
            Ok(())
        })
    }

    pub(crate) fn include(&mut self, include: &Include) -> Result<()> {
        let attributes = self.inline_attributes(&include.attributes)?;
        self.directive_line(|cx| {
            cx.target.write_str("include::");
            cx.target.write_str(&include.path);
            cx.target.write_str(&attributes);
            Ok(())
        })
    }
}
