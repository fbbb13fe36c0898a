//! Benchmarks for the layout engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use word_pager::document::{ColumnConfig, ParagraphFormat, SectionStart};
use word_pager::{
    layout, Document, GreedyLineBreaker, LayoutOptions, Paragraph, Section, SectionProperties,
    Table,
};

const SENTENCE: &str =
    "Paragraph text contains enough words to span multiple lines and test the line breaking algorithm. ";

fn document(paragraphs: usize, columns: u16) -> Document {
    let mut props = SectionProperties::default();
    props.columns = ColumnConfig::equal(columns, 48.0);
    let mut section = Section::new(props);

    for i in 0..paragraphs {
        let format = ParagraphFormat {
            keep_with_next: i % 10 == 0,
            ..ParagraphFormat::default()
        };
        section.push(Paragraph::new(SENTENCE.repeat(1 + i % 4)).with_format(format));
        if i % 25 == 24 {
            section.push(Table::with_rows(4, 3));
        }
    }
    Document::new().with_section(section)
}

fn bench_layout_small(c: &mut Criterion) {
    c.bench_function("layout_small_document", |b| {
        let document = Document::from_text("Hello, World! This is a small document.\nIt has a few paragraphs.");
        let options = LayoutOptions::default();
        let breaker = GreedyLineBreaker::new();

        b.iter(|| layout(black_box(&document), &options, &breaker));
    });
}

fn bench_layout_medium(c: &mut Criterion) {
    c.bench_function("layout_medium_document", |b| {
        // Roughly 10 pages of content
        let document = document(100, 1);
        let options = LayoutOptions::default();
        let breaker = GreedyLineBreaker::new();

        b.iter(|| layout(black_box(&document), &options, &breaker));
    });
}

fn bench_layout_columns(c: &mut Criterion) {
    c.bench_function("layout_two_column_document", |b| {
        let document = document(100, 2);
        let options = LayoutOptions::default();
        let breaker = GreedyLineBreaker::new();

        b.iter(|| layout(black_box(&document), &options, &breaker));
    });
}

fn bench_layout_many_sections(c: &mut Criterion) {
    c.bench_function("layout_many_sections", |b| {
        let mut document = Document::new();
        for i in 0..50 {
            let props = SectionProperties {
                start: if i % 2 == 0 {
                    SectionStart::NextPage
                } else {
                    SectionStart::Continuous
                },
                ..SectionProperties::default()
            };
            document = document.with_section(
                Section::new(props)
                    .with_block(Paragraph::new(SENTENCE.repeat(3)))
                    .with_block(Paragraph::new(SENTENCE)),
            );
        }
        let options = LayoutOptions::default();
        let breaker = GreedyLineBreaker::new();

        b.iter(|| layout(black_box(&document), &options, &breaker));
    });
}

fn bench_page_at_offset(c: &mut Criterion) {
    c.bench_function("page_at_offset", |b| {
        let result = layout(&document(300, 1), &LayoutOptions::default(), &GreedyLineBreaker::new())
            .expect("layout");
        let middle = result.total_height(16.0) / 2.0;

        b.iter(|| black_box(result.page_at_offset(black_box(middle), 16.0)));
    });
}

criterion_group!(
    benches,
    bench_layout_small,
    bench_layout_medium,
    bench_layout_columns,
    bench_layout_many_sections,
    bench_page_at_offset,
);

criterion_main!(benches);
