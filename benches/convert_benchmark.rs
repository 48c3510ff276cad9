//! Benchmarks for docflow conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks convert synthetic documents of mixed content.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use docflow::convert::{ConversionInput, ConversionState, ConvertOptions, FlowConverter, PositionMap};
use docflow::model::{
    Document, DocumentNode, Mark, NodeKind, ParagraphAttrs, TabAttrs, TableAttrs,
    TableCellAttrs, TableRowAttrs, TextStyleAttrs,
};

/// Creates a synthetic document with the given number of paragraphs.
///
/// Every tenth node is a small table; paragraphs mix plain and styled text
/// with a tab so run merging has work to do.
fn create_test_document(paragraph_count: usize) -> Document {
    let mut next_id = 0u64;
    let mut id = || {
        next_id += 1;
        next_id
    };

    let mut content = Vec::with_capacity(paragraph_count);
    for i in 0..paragraph_count {
        if i % 10 == 9 {
            let cell = DocumentNode::new(NodeKind::TableCell(TableCellAttrs::default()))
                .with_children(vec![DocumentNode::paragraph(
                    ParagraphAttrs::default(),
                    vec![DocumentNode::text(format!("Cell {i}")).with_id(id())],
                )
                .with_id(id())])
                .with_id(id());
            let row = DocumentNode::new(NodeKind::TableRow(TableRowAttrs::default()))
                .with_children(vec![cell.clone(), cell])
                .with_id(id());
            content.push(
                DocumentNode::new(NodeKind::Table(TableAttrs::default()))
                    .with_children(vec![row])
                    .with_id(id()),
            );
            continue;
        }

        let georgia = Mark::TextStyle(TextStyleAttrs {
            font_family: Some("Georgia".into()),
            ..Default::default()
        });
        let children = vec![
            DocumentNode::text(format!("Paragraph {i} opens ")).with_id(id()),
            DocumentNode::text("and continues ").with_id(id()),
            DocumentNode::text("in another face").with_mark(georgia).with_id(id()),
            DocumentNode::new(NodeKind::Tab(TabAttrs::default())).with_id(id()),
            DocumentNode::text("after a tab.").with_id(id()),
        ];
        content.push(
            DocumentNode::paragraph(
                ParagraphAttrs {
                    stable_id: Some(format!("para-{i}")),
                    ..Default::default()
                },
                children,
            )
            .with_id(id()),
        );
    }

    Document::new(content)
}

/// Benchmark a single cold conversion.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for size in [10, 100, 1000] {
        let doc = create_test_document(size);
        let positions = PositionMap::from_nodes(&doc.content);
        let converter = FlowConverter::new(ConvertOptions::default());

        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| {
                let mut state = ConversionState::new();
                let input = ConversionInput::new(black_box(doc)).with_positions(&positions);
                converter.convert(input, &mut state)
            });
        });
    }

    group.finish();
}

/// Benchmark repeated conversion with a warm flow block cache.
fn bench_convert_cached(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_cached");

    for size in [100, 1000] {
        let doc = create_test_document(size);
        let positions = PositionMap::from_nodes(&doc.content);
        let converter = FlowConverter::new(ConvertOptions::default());
        let mut state = ConversionState::with_cache();
        converter.convert(ConversionInput::new(&doc).with_positions(&positions), &mut state);

        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| {
                let input = ConversionInput::new(black_box(doc)).with_positions(&positions);
                converter.convert(input, &mut state)
            });
        });
    }

    group.finish();
}

/// Benchmark position derivation.
fn bench_positions(c: &mut Criterion) {
    let doc = create_test_document(1000);

    c.bench_function("positions_1000", |b| {
        b.iter(|| PositionMap::from_nodes(black_box(&doc.content)));
    });
}

/// Benchmark JSON projection of converted blocks.
fn bench_render_json(c: &mut Criterion) {
    let doc = create_test_document(100);
    let blocks = docflow::to_flow_blocks(&doc);

    c.bench_function("render_json_100", |b| {
        b.iter(|| docflow::render::to_json(black_box(&blocks), docflow::JsonFormat::Compact));
    });
}

criterion_group!(
    benches,
    bench_convert,
    bench_convert_cached,
    bench_positions,
    bench_render_json
);
criterion_main!(benches);
