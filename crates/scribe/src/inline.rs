//! Inline element emitters.
//!
//! Anchors, references, links and other macros are written inside a block
//! so that wrapping can move them to a new line but never split them.

use adoc::{Anchor, Counter, CrossReference, Element, Formatted, Image, Link, ReferenceForm};

use crate::error::Result;
use crate::render::RenderContext;
use crate::target::Target;

impl<T: Target> RenderContext<T> {
    pub(crate) fn line_break(&mut self) {
        self.target.start_block();
        self.target.write_str(" +");
        self.target.end_block();
        self.target.write_char('\n');
    }

    pub(crate) fn formatted(&mut self, formatted: &Formatted) -> Result<()> {
        let delimiter = formatted.kind.delimiter();
        let doubled = formatted.unconstrained && formatted.kind.has_unconstrained_form();
        let write_delimiter = |target: &mut T| {
            target.write_char(delimiter);
            if doubled {
                target.write_char(delimiter);
            }
        };
        write_delimiter(&mut self.target);
        self.elements(&formatted.elements)?;
        write_delimiter(&mut self.target);
        Ok(())
    }

    pub(crate) fn anchor(&mut self, anchor: &Anchor) -> Result<()> {
        let label = self.label_text(&anchor.label)?;
        self.atomic(|cx| {
            cx.target.write_str("[[");
            cx.target.write_str(&anchor.id);
            if !label.is_empty() {
                cx.target.write_char(',');
                cx.target.write_str(&label);
            }
            cx.target.write_str("]]");
            Ok(())
        })
    }

    pub(crate) fn cross_reference(&mut self, xref: &CrossReference) -> Result<()> {
        let label = self.label_text(&xref.label)?;
        self.atomic(|cx| {
            match xref.form {
                ReferenceForm::Shorthand => {
                    cx.target.write_str("<<");
                    cx.target.write_str(&xref.id);
                    if !label.is_empty() {
                        cx.target.write_char(',');
                        cx.target.write_str(&label);
                    }
                    cx.target.write_str(">>");
                }
                ReferenceForm::Macro => {
                    cx.target.write_str("xref:");
                    cx.target.write_str(&xref.id);
                    cx.target.write_char('[');
                    cx.target.write_str(&escape_brackets(&label));
                    cx.target.write_char(']');
                }
            }
            Ok(())
        })
    }

    pub(crate) fn link(&mut self, link: &Link) -> Result<()> {
        let label = match &link.label {
            Some(label) => Some(self.label_text(label)?),
            None => None,
        };
        self.atomic(|cx| {
            if link.macro_form {
                cx.target.write_str("link:");
            }
            cx.target.write_str(&link.url);
            match &label {
                Some(label) => {
                    cx.target.write_char('[');
                    cx.target.write_str(&escape_brackets(label));
                    cx.target.write_char(']');
                }
                None if link.macro_form => cx.target.write_str("[]"),
                None => {}
            }
            Ok(())
        })
    }

    pub(crate) fn counter(&mut self, counter: &Counter) -> Result<()> {
        self.atomic(|cx| {
            cx.target
                .write_str(if counter.hidden { "{counter2:" } else { "{counter:" });
            cx.target.write_str(&counter.name);
            if let Some(initial) = &counter.initial {
                cx.target.write_char(':');
                cx.target.write_str(initial);
            }
            cx.target.write_char('}');
            Ok(())
        })
    }

    pub(crate) fn inline_image(&mut self, image: &Image) -> Result<()> {
        let attributes = self.inline_attributes(&image.attributes)?;
        self.atomic(|cx| {
            cx.target.write_str("image:");
            cx.target.write_str(&image.path);
            cx.target.write_str(&attributes);
            Ok(())
        })
    }

    /// Renders a label through a sub-target and flattens it onto one line.
    pub(crate) fn label_text(&self, label: &[Element]) -> Result<String> {
        if label.is_empty() {
            return Ok(String::new());
        }
        let text = self.measure(label)?;
        Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

/// Escapes `]` so a label cannot close its macro early.
fn escape_brackets(text: &str) -> String {
    text.replace(']', "\\]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::UnwrappedTarget;
    use crate::wrap::WrappedTarget;
    use adoc::FormatKind;

    fn render(elements: &[Element]) -> String {
        let mut cx = RenderContext::new(UnwrappedTarget::new());
        cx.elements(elements).unwrap();
        cx.finish()
    }

    #[test]
    fn test_formatted() {
        let bold = Formatted::new(FormatKind::Bold, vec![Element::text("b")]);
        let mono =
            Formatted::new(FormatKind::Monospace, vec![Element::text("m")]).unconstrained(true);
        let sup =
            Formatted::new(FormatKind::Superscript, vec![Element::text("2")]).unconstrained(true);
        assert_eq!(
            render(&[
                bold.into(),
                Element::text(" "),
                mono.into(),
                Element::text(" x"),
                sup.into()
            ]),
            "*b* ``m`` x^2^"
        );
    }

    #[test]
    fn test_anchor_and_xref() {
        let anchor = Anchor::new("foo").label(vec![Element::text("Label\nText")]);
        let xref = CrossReference::new("foo");
        let labelled = CrossReference::new("bar").label(vec![Element::text("The Bar")]);
        let macro_form = CrossReference::new("baz")
            .label(vec![Element::text("a [b]")])
            .form(ReferenceForm::Macro);
        assert_eq!(
            render(&[anchor.into(), xref.into(), labelled.into(), macro_form.into()]),
            "[[foo,Label Text]]<<foo>><<bar,The Bar>>xref:baz[a [b\\]]"
        );
    }

    #[test]
    fn test_links() {
        let bare = Link::new("https://example.com");
        let labelled = Link::new("https://example.com").label(vec![Element::text("site")]);
        let macro_form = Link::new("file.txt").macro_form(true);
        assert_eq!(
            render(&[
                bare.into(),
                Element::text(" "),
                labelled.into(),
                Element::text(" "),
                macro_form.into()
            ]),
            "https://example.com https://example.com[site] link:file.txt[]"
        );
    }

    #[test]
    fn test_counters_and_references() {
        assert_eq!(
            render(&[
                Counter::new("table").into(),
                Counter::new("fig").initial("A").hidden(true).into(),
                Element::attribute_reference("version"),
                Element::Passthrough {
                    text: "<b>".to_string()
                },
            ]),
            "{counter:table}{counter2:fig:A}{version}pass:[<b>]"
        );
    }

    #[test]
    fn test_inline_image() {
        let image = Image::new("logo.png").attributes(vec![
            adoc::Attribute::positional("Logo text"),
            adoc::Attribute::named("width", "100"),
        ]);
        assert_eq!(
            render(&[image.into()]),
            "image:logo.png[\"Logo text\",width=100]"
        );
    }

    #[test]
    fn test_line_break_is_hard() {
        let mut cx = RenderContext::new(WrappedTarget::new(80));
        cx.elements(&[
            Element::text("first"),
            Element::LineBreak,
            Element::text("second"),
            Element::NewLine,
            Element::text("third"),
            Element::NewLine,
        ])
        .unwrap();
        assert_eq!(cx.finish(), "first +\nsecond third\n");
    }

    #[test]
    fn test_line_break_after_full_line_keeps_marker() {
        let mut cx = RenderContext::new(WrappedTarget::new(10));
        cx.elements(&[
            Element::text("abcdefghij"),
            Element::LineBreak,
            Element::text("next\n"),
        ])
        .unwrap();
        assert_eq!(cx.finish(), "abcdefghij +\nnext\n");
    }

    #[test]
    fn test_line_break_splits_before_marker_word() {
        let mut cx = RenderContext::new(WrappedTarget::new(12));
        cx.elements(&[
            Element::text("aaaa bbbbbbbb"),
            Element::LineBreak,
            Element::text("next\n"),
        ])
        .unwrap();
        assert_eq!(cx.finish(), "aaaa\nbbbbbbbb +\nnext\n");
    }

    #[test]
    fn test_xref_moves_as_a_unit() {
        let mut cx = RenderContext::new(WrappedTarget::new(20));
        cx.elements(&[
            Element::text("Refer to the "),
            CrossReference::new("ref_Thing")
                .label(vec![Element::text("Thing")])
                .into(),
            Element::text(" now.\n"),
        ])
        .unwrap();
        assert_eq!(cx.finish(), "Refer to the\n<<ref_Thing,Thing>>\nnow.\n");
    }
}
