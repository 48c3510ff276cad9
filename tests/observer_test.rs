//! Integration tests for block observers.

use pretty_assertions::assert_eq;

use docflow::convert::{ConversionInput, ConversionState, FlowConverter};
use docflow::model::{ImageAttrs, NodeKind, ParagraphAttrs, TableAttrs};
use docflow::render::{BlockObserver, CompositeObserver, KindRecorder};
use docflow::{BlockKind, ConversionStats, ConvertOptions, Document, DocumentNode, FlowBlock};

/// Counts document boundaries and tables.
#[derive(Default)]
struct LifecycleCounter {
    starts: usize,
    ends: usize,
    tables: usize,
}

impl BlockObserver for LifecycleCounter {
    fn record(&mut self, kind: BlockKind, _block: &FlowBlock) {
        if kind == BlockKind::Table {
            self.tables += 1;
        }
    }

    fn on_document_start(&mut self) {
        self.starts += 1;
    }

    fn on_document_end(&mut self) {
        self.ends += 1;
    }
}

fn create_sample_document() -> Document {
    Document::new(vec![
        DocumentNode::paragraph(
            ParagraphAttrs::default(),
            vec![DocumentNode::text("Quarterly results")],
        ),
        DocumentNode::new(NodeKind::Table(TableAttrs::default())),
        DocumentNode::new(NodeKind::Image(ImageAttrs {
            src: Some("chart.png".into()),
            ..Default::default()
        })),
        DocumentNode::paragraph(
            ParagraphAttrs::default(),
            vec![DocumentNode::text("Closing remarks here")],
        ),
    ])
}

#[test]
fn test_observer_sees_blocks_in_order() {
    let document = create_sample_document();
    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::new();
    let mut recorder = KindRecorder::new();

    let result =
        converter.convert_with_observer(ConversionInput::new(&document), &mut state, &mut recorder);

    assert_eq!(
        recorder.kinds(),
        vec![
            BlockKind::Paragraph,
            BlockKind::Table,
            BlockKind::Image,
            BlockKind::Paragraph,
        ]
    );
    let ids: Vec<&str> = result.blocks.iter().map(FlowBlock::id).collect();
    assert_eq!(recorder.ids(), ids);
}

#[test]
fn test_composite_forwards_to_every_observer() {
    let document = create_sample_document();
    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::new();

    let mut recorder = KindRecorder::new();
    let mut counter = LifecycleCounter::default();
    let mut stats = ConversionStats::new();
    {
        let mut composite = CompositeObserver::new()
            .with_observer(&mut recorder)
            .with_observer(&mut counter)
            .with_observer(&mut stats);
        assert_eq!(composite.len(), 3);
        converter.convert_with_observer(ConversionInput::new(&document), &mut state, &mut composite);
    }

    assert_eq!(recorder.len(), 4);
    assert_eq!((counter.starts, counter.ends, counter.tables), (1, 1, 1));
    assert_eq!(stats.count(BlockKind::Paragraph), 2);
    assert_eq!(stats.word_count, 5);
}

#[test]
fn test_result_stats_match_observed_stats() {
    let document = create_sample_document();
    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::new();
    let mut observed = ConversionStats::new();

    let result =
        converter.convert_with_observer(ConversionInput::new(&document), &mut state, &mut observed);

    assert_eq!(result.stats.blocks_by_kind, observed.blocks_by_kind);
    assert_eq!(result.stats.word_count, observed.word_count);
    assert_eq!(result.stats.paragraph_count, 2);
}
