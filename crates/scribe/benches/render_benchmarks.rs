//! Benchmarks for the wrap engine and table layout.

use adoc::{Document, Element, Paragraph, Table, TableCell, TableRow};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use scribe::{Renderer, Target, WrappedTarget};

const WORDS: &[&str] = &[
    "cluster", "attribute", "the", "of", "a", "command", "shall", "be", "reported", "when",
    "value", "changes", "identifier", "to", "device",
];

fn prose(words: usize) -> String {
    let mut text = String::new();
    for index in 0..words {
        text.push_str(WORDS[index % WORDS.len()]);
        // Hard-wrapped source: a newline every eight words.
        text.push(if index % 8 == 7 { '\n' } else { ' ' });
    }
    text.push('\n');
    text
}

fn table(rows: usize, columns: usize) -> Table {
    Table::new(
        (0..rows)
            .map(|row| {
                TableRow::Cells(
                    (0..columns)
                        .map(|column| TableCell::text(WORDS[(row * 7 + column) % WORDS.len()]))
                        .collect(),
                )
            })
            .collect(),
    )
}

fn benchmark_wrap_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scribe/wrap");
    for words in [100, 1_000, 10_000] {
        let text = prose(words);
        group.throughput(Throughput::Bytes(text.len() as u64));
        for wrap in [0, 80] {
            group.bench_with_input(
                BenchmarkId::new(format!("wrap{wrap}"), words),
                &text,
                |b, text| {
                    b.iter(|| {
                        let mut target = WrappedTarget::new(wrap);
                        target.write_str(black_box(text));
                        black_box(target.finish())
                    });
                },
            );
        }
    }
    group.finish();
}

fn benchmark_document(c: &mut Criterion) {
    let doc = Document::new(
        (0..50)
            .map(|_| Paragraph::new(vec![Element::text(prose(60))]).into())
            .collect(),
    );
    let renderer = Renderer::new().with_wrap(80);
    c.bench_function("scribe/render_document", |b| {
        b.iter(|| black_box(renderer.render(black_box(&doc))));
    });
}

fn benchmark_table_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("scribe/table");
    for rows in [10, 100, 500] {
        let elements = vec![Element::Table(table(rows, 6))];
        let renderer = Renderer::new().with_wrap(80);
        group.bench_with_input(BenchmarkId::new("rows", rows), &elements, |b, elements| {
            b.iter(|| black_box(renderer.render_elements(black_box(elements))));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_wrap_engine,
    benchmark_document,
    benchmark_table_layout
);
criterion_main!(benches);
