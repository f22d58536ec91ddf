//! Deserialization of element trees handed over as JSON.

use adoc::{
    Attribute, BlockContent, BlockKind, CellStyle, Document, Element, HorizontalAlign, TableRow,
};

#[test]
fn test_paragraph_with_inline_elements() {
    let json = r#"{
        "elements": [
            {"type": "paragraph", "elements": [
                {"type": "text", "text": "See "},
                {"type": "cross_reference", "id": "ref_Foo", "label": [{"type": "text", "text": "Foo"}]},
                {"type": "new_line"}
            ]}
        ]
    }"#;
    let doc: Document = serde_json::from_str(json).unwrap();
    assert_eq!(doc.elements.len(), 1);
    let Element::Paragraph(para) = &doc.elements[0] else {
        panic!("expected paragraph, got {:?}", doc.elements[0]);
    };
    assert_eq!(para.elements.len(), 3);
    assert!(matches!(&para.elements[1], Element::CrossReference(x) if x.id == "ref_Foo"));
}

#[test]
fn test_unknown_type_is_unsupported() {
    let json = r#"{"elements": [{"type": "something_new"}]}"#;
    let doc: Document = serde_json::from_str(json).unwrap();
    assert_eq!(doc.elements, vec![Element::Unsupported]);
}

#[test]
fn test_table_with_formats_and_raw_rows() {
    let json = r#"{"elements": [{
        "type": "table",
        "attributes": [
            {"type": "id", "id": "tbl"},
            {"type": "columns", "columns": [{}, {"style": "ascii_doc", "width": {"proportional": 2}}]}
        ],
        "rows": [
            {"cells": [
                {"format": {"horizontal_align": "center", "span": {"columns": 2}}, "elements": [{"type": "text", "text": "wide"}]}
            ]},
            {"raw": {"type": "end_if", "names": ["x"]}},
            {"cells": [{"elements": []}, {"elements": []}]}
        ]
    }]}"#;
    let doc: Document = serde_json::from_str(json).unwrap();
    let Element::Table(table) = &doc.elements[0] else {
        panic!("expected table");
    };
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.columns()[1].style, Some(CellStyle::AsciiDoc));
    assert!(matches!(&table.attributes[0], Attribute::Id { id } if id == "tbl"));

    let TableRow::Cells(first) = &table.rows[0] else {
        panic!("expected cells");
    };
    let format = first[0].format.unwrap();
    assert_eq!(format.span.columns, 2);
    assert_eq!(format.span.rows, 1);
    assert_eq!(format.horizontal_align, Some(HorizontalAlign::Center));
    assert_eq!(format.to_string(), "2+^");

    assert!(matches!(&table.rows[1], TableRow::Raw(e) if e.kind() == "end_if"));
}

#[test]
fn test_delimited_block_content() {
    let json = r#"{"elements": [
        {"type": "delimited_block", "kind": "listing", "content": {"lines": ["a", "  b"]}},
        {"type": "delimited_block", "kind": "example", "content": {"elements": [{"type": "text", "text": "x"}]}}
    ]}"#;
    let doc: Document = serde_json::from_str(json).unwrap();
    let Element::DelimitedBlock(listing) = &doc.elements[0] else {
        panic!("expected block");
    };
    assert_eq!(listing.kind, BlockKind::Listing);
    assert_eq!(
        listing.content,
        BlockContent::Lines(vec!["a".to_string(), "  b".to_string()])
    );
    assert_eq!(doc.elements[1].children(), &[Element::text("x")]);
}

#[test]
fn test_serialize_round_trip_keeps_tags() {
    let doc = Document::new(vec![Element::text("hi"), Element::EmptyLine]);
    let json = serde_json::to_string(&doc).unwrap();
    assert!(json.contains(r#""type":"empty_line""#));
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}
