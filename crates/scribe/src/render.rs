//! The element dispatcher.
//!
//! [`RenderContext`] owns a [`Target`] and walks the element tree depth
//! first, turning each element into target calls. The per-kind emitters
//! live in `inline`, `block`, `attributes` and `table`, each adding an
//! `impl` block to this type.

use adoc::Element;
use tracing::debug;

use crate::error::{RenderError, Result};
use crate::target::{Target, UnwrappedTarget};

/// Rendering state for one target.
pub(crate) struct RenderContext<T: Target> {
    pub(crate) target: T,
    /// Nesting depth of tables; nested tables use `!` delimiters.
    pub(crate) table_depth: usize,
}

impl<T: Target> RenderContext<T> {
    pub(crate) fn new(target: T) -> Self {
        Self::nested(target, 0)
    }

    pub(crate) fn nested(target: T, table_depth: usize) -> Self {
        Self {
            target,
            table_depth,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.target.finish()
    }

    pub(crate) fn elements(&mut self, elements: &[Element]) -> Result<()> {
        for element in elements {
            self.element(element)?;
        }
        Ok(())
    }

    pub(crate) fn element(&mut self, element: &Element) -> Result<()> {
        match element {
            // Inline
            Element::Text { text } => self.target.write_str(text),
            Element::NewLine => self.target.write_char('\n'),
            Element::EmptyLine => {
                self.target.ensure_newline();
                self.target.write_char('\n');
            }
            Element::LineBreak => self.line_break(),
            Element::Formatted(formatted) => self.formatted(formatted)?,
            Element::Anchor(anchor) => self.anchor(anchor)?,
            Element::CrossReference(xref) => self.cross_reference(xref)?,
            Element::Link(link) => self.link(link)?,
            Element::AttributeReference { name } => {
                self.atomic(|cx| {
                    cx.target.write_char('{');
                    cx.target.write_str(name);
                    cx.target.write_char('}');
                    Ok(())
                })?;
            }
            Element::Counter(counter) => self.counter(counter)?,
            Element::Passthrough { text } => {
                self.atomic(|cx| {
                    cx.target.write_str("pass:[");
                    cx.target.write_str(text);
                    cx.target.write_char(']');
                    Ok(())
                })?;
            }
            Element::Image(image) if image.block => self.block_image(image)?,
            Element::Image(image) => self.inline_image(image)?,

            // Blocks
            Element::Section(section) => self.section(section)?,
            Element::Paragraph(paragraph) => self.paragraph(paragraph)?,
            Element::ListItem(item) => self.list_item(item)?,
            Element::DescriptionItem(item) => self.description_item(item)?,
            Element::ListContinuation => {
                self.target.ensure_newline();
                self.target.write_str("+\n");
            }
            Element::DelimitedBlock(block) => self.delimited_block(block)?,
            Element::Table(table) => self.table(table)?,
            Element::HorizontalRule => self.directive_line(|cx| {
                cx.target.write_str("'''");
                Ok(())
            })?,
            Element::PageBreak => self.directive_line(|cx| {
                cx.target.write_str("<<<");
                Ok(())
            })?,

            // Directives
            Element::AttributeEntry(entry) => self.attribute_entry(entry)?,
            Element::AttributeReset { name } => self.directive_line(|cx| {
                cx.target.write_char(':');
                cx.target.write_str(name);
                cx.target.write_str("!:");
                Ok(())
            })?,
            Element::Comment { text } => self.directive_line(|cx| {
                cx.target.write_str("//");
                cx.target.write_str(text);
                Ok(())
            })?,
            Element::Conditional(conditional) => self.conditional(conditional)?,
            Element::IfEval { expression } => self.directive_line(|cx| {
                cx.target.write_str("ifeval::[");
                cx.target.write_str(expression);
                cx.target.write_char(']');
                Ok(())
            })?,
            Element::EndIf { names } => self.directive_line(|cx| {
                cx.target.write_str("endif::");
                cx.target.write_str(&names.join(","));
                cx.target.write_str("[]");
                Ok(())
            })?,
            Element::Include(include) => self.include(include)?,

            Element::Unsupported => {
                debug!("refusing to render unsupported element");
                return Err(RenderError::UnsupportedElement);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Runs `f` inside a block so its output is emitted as one unit.
    pub(crate) fn atomic(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        self.target.start_block();
        let result = f(self);
        self.target.end_block();
        result
    }

    /// Runs `f` with wrapping suspended.
    pub(crate) fn unwrapped(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        self.target.disable_wrap();
        let result = f(self);
        self.target.enable_wrap();
        result
    }

    /// Emits a single directive line, on a line of its own, unwrapped.
    pub(crate) fn directive_line(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<()> {
        self.target.ensure_newline();
        self.unwrapped(|cx| {
            f(cx)?;
            cx.target.write_char('\n');
            Ok(())
        })
    }

    /// Renders elements into a detached target and returns the text.
    pub(crate) fn measure(&self, elements: &[Element]) -> Result<String> {
        self.measure_nested(elements, self.table_depth)
    }

    pub(crate) fn measure_nested(
        &self,
        elements: &[Element],
        table_depth: usize,
    ) -> Result<String> {
        let mut sub: RenderContext<UnwrappedTarget> =
            RenderContext::nested(self.target.subtarget(), table_depth);
        sub.elements(elements)?;
        Ok(sub.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::WrappedTarget;
    use adoc::{Attribute, Conditional, ConditionalKind, Include};

    fn render(elements: &[Element]) -> Result<String> {
        let mut cx = RenderContext::new(UnwrappedTarget::new());
        cx.elements(elements)?;
        Ok(cx.finish())
    }

    #[test]
    fn test_unsupported_element_fails() {
        let err = render(&[Element::text("before"), Element::Unsupported]).unwrap_err();
        assert_eq!(err, RenderError::UnsupportedElement);
    }

    #[test]
    fn test_directive_lines() {
        let out = render(&[
            Element::text("text"),
            Element::AttributeReset {
                name: "toc".to_string(),
            },
            Element::comment(" note"),
            Conditional::new(ConditionalKind::IfNDef, ["a", "b"]).into(),
            Element::IfEval {
                expression: "{x} > 1".to_string(),
            },
            Element::end_if(["a", "b"]),
            Include::new("other.adoc")
                .attributes(vec![Attribute::named("leveloffset", "+1")])
                .into(),
            Element::HorizontalRule,
            Element::PageBreak,
        ])
        .unwrap();
        assert_eq!(
            out,
            "text\n:toc!:\n// note\nifndef::a,b[]\nifeval::[{x} > 1]\nendif::a,b[]\n\
             include::other.adoc[leveloffset=+1]\n'''\n<<<\n"
        );
    }

    #[test]
    fn test_list_continuation() {
        let out = render(&[Element::text("item"), Element::ListContinuation]).unwrap();
        assert_eq!(out, "item\n+\n");
    }

    #[test]
    fn test_empty_line() {
        let out = render(&[Element::text("a"), Element::EmptyLine, Element::text("b")]).unwrap();
        assert_eq!(out, "a\n\nb");
    }

    #[test]
    fn test_directive_is_never_merged() {
        let mut cx = RenderContext::new(WrappedTarget::new(80));
        cx.elements(&[
            Element::text("short"),
            Element::NewLine,
            Element::end_if(Vec::<String>::new()),
            Element::text("next"),
            Element::NewLine,
        ])
        .unwrap();
        assert_eq!(cx.finish(), "short\nendif::[]\nnext\n");
    }
}
