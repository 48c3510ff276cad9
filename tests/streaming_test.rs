//! Integration tests for the streaming driver.

use pretty_assertions::assert_eq;

use docflow::convert::{ConversionInput, ConversionState, FlowConverter, FlowEvent, PositionMap};
use docflow::model::{LineBreakAttrs, NodeKind, ParagraphAttrs, SectionProperties};
use docflow::{BlockKind, ConvertOptions, Document, DocumentNode, FlowBlock};

fn create_sample_document() -> Document {
    let mut closing = DocumentNode::paragraph(
        ParagraphAttrs::default(),
        vec![DocumentNode::text("End of part one").with_id(2)],
    )
    .with_id(1);
    if let NodeKind::Paragraph(attrs) = &mut closing.kind {
        attrs.section_properties = Some(SectionProperties::default());
    }

    Document::new(vec![
        closing,
        DocumentNode::new(NodeKind::LineBreak(LineBreakAttrs {
            break_type: Some("column".into()),
        }))
        .with_id(3),
        DocumentNode::paragraph(
            ParagraphAttrs::default(),
            vec![DocumentNode::text("Part two").with_id(5)],
        )
        .with_id(4),
    ])
}

fn collect_events(document: &Document) -> Vec<FlowEvent> {
    let positions = PositionMap::from_nodes(&document.content);
    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::new();
    converter
        .stream(
            ConversionInput::new(document).with_positions(&positions),
            &mut state,
        )
        .collect()
}

#[test]
fn test_stream_boundaries() {
    let events = collect_events(&create_sample_document());

    assert!(matches!(
        events.first(),
        Some(FlowEvent::DocumentStart {
            node_count: 3,
            section_count: 2
        })
    ));
    assert!(matches!(events.last(), Some(FlowEvent::DocumentEnd { .. })));
}

#[test]
fn test_stream_one_event_per_top_level_node() {
    let events = collect_events(&create_sample_document());

    let indices: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            FlowEvent::Blocks { node_index, .. } => Some(*node_index),
            _ => None,
        })
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_stream_section_break_travels_with_its_paragraph() {
    let events = collect_events(&create_sample_document());

    let per_node: Vec<Vec<BlockKind>> = events
        .iter()
        .filter_map(FlowEvent::blocks)
        .map(|blocks| blocks.iter().map(FlowBlock::kind).collect())
        .collect();
    assert_eq!(
        per_node,
        vec![
            vec![BlockKind::Paragraph],
            vec![BlockKind::ColumnBreak],
            vec![BlockKind::SectionBreak, BlockKind::Paragraph],
        ]
    );
}

#[test]
fn test_stream_matches_convert() {
    let document = create_sample_document();
    let streamed: Vec<FlowBlock> = collect_events(&document)
        .into_iter()
        .filter_map(|event| match event {
            FlowEvent::Blocks { blocks, .. } => Some(blocks),
            _ => None,
        })
        .flatten()
        .collect();

    let converted = docflow::convert_document(&document, &ConvertOptions::default());
    assert_eq!(streamed, converted.blocks);
}

#[test]
fn test_stream_final_stats() {
    let events = collect_events(&create_sample_document());

    let Some(FlowEvent::DocumentEnd { stats }) = events.last() else {
        panic!("stream must end with DocumentEnd");
    };
    assert_eq!(stats.paragraph_count, 2);
    assert_eq!(stats.count(BlockKind::Paragraph), 2);
    assert_eq!(stats.count(BlockKind::ColumnBreak), 1);
    assert_eq!(stats.count(BlockKind::SectionBreak), 1);
    assert_eq!(stats.total_blocks(), 4);
}

#[test]
fn test_stream_can_stop_early() {
    let document = create_sample_document();
    let positions = PositionMap::from_nodes(&document.content);
    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::new();

    let mut stream = converter.stream(
        ConversionInput::new(&document).with_positions(&positions),
        &mut state,
    );
    assert!(matches!(stream.next(), Some(FlowEvent::DocumentStart { .. })));
    let first = stream.next().unwrap();
    assert_eq!(first.blocks().map(<[FlowBlock]>::len), Some(1));
    assert!(!stream.is_done());
    assert_eq!(stream.stats().paragraph_count, 1);
}

#[test]
fn test_empty_document_stream() {
    let events = collect_events(&Document::default());
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(FlowEvent::is_document_boundary));
}
