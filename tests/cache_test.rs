//! Integration tests for incremental conversion with the flow block cache.

use pretty_assertions::assert_eq;

use docflow::convert::{ConversionInput, ConversionState, FlowConverter, PositionMap};
use docflow::model::{BookmarkAttrs, FootnoteReferenceAttrs, NodeKind, ParagraphAttrs, SdtAttrs};
use docflow::{ConversionResult, ConvertOptions, Docflow, Document, DocumentNode, FlowBlock};

/// Hands out unique node ids so position maps stay unambiguous.
struct Ids(u64);

impl Ids {
    fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

fn paragraph(ids: &mut Ids, stable_id: Option<&str>, text: &str) -> DocumentNode {
    DocumentNode::paragraph(
        ParagraphAttrs {
            stable_id: stable_id.map(str::to_string),
            ..Default::default()
        },
        vec![DocumentNode::text(text).with_id(ids.next())],
    )
    .with_id(ids.next())
}

fn bookmarked_paragraph(ids: &mut Ids, stable_id: &str, name: &str) -> DocumentNode {
    let bookmark = DocumentNode::new(NodeKind::BookmarkStart(BookmarkAttrs {
        name: Some(name.to_string()),
        ..Default::default()
    }))
    .with_children(vec![DocumentNode::text("Target").with_id(ids.next())])
    .with_id(ids.next());

    DocumentNode::paragraph(
        ParagraphAttrs {
            stable_id: Some(stable_id.to_string()),
            ..Default::default()
        },
        vec![DocumentNode::text("See ").with_id(ids.next()), bookmark],
    )
    .with_id(ids.next())
}

fn run_pass(converter: &FlowConverter, document: &Document, state: &mut ConversionState) -> ConversionResult {
    let positions = PositionMap::from_nodes(&document.content);
    converter.convert(
        ConversionInput::new(document).with_positions(&positions),
        state,
    )
}

fn blocks_for<'a>(result: &'a ConversionResult, id: &str) -> Vec<&'a FlowBlock> {
    result.blocks.iter().filter(|b| b.id() == id).collect()
}

#[test]
fn test_cache_hit_matches_fresh_conversion_after_shift() {
    let mut ids = Ids(0);
    let alpha = paragraph(&mut ids, Some("alpha"), "Alpha paragraph");
    let beta = bookmarked_paragraph(&mut ids, "beta", "_Ref1");
    let inserted = paragraph(&mut ids, None, "Inserted before");

    let before = Document::new(vec![alpha.clone(), beta.clone()]);
    let after = Document::new(vec![inserted, alpha, beta]);

    let converter = FlowConverter::new(ConvertOptions::default());
    let mut cached = ConversionState::with_cache();
    let first = run_pass(&converter, &before, &mut cached);
    let second = run_pass(&converter, &after, &mut cached);
    assert_eq!(second.stats.cache_hits, 2);
    assert_eq!(second.stats.cache_misses, 0);

    let mut fresh_state = ConversionState::new();
    let fresh = run_pass(&converter, &after, &mut fresh_state);
    assert_eq!(second.blocks, fresh.blocks);
    assert_eq!(
        cached.bookmarks.get("_Ref1"),
        fresh_state.bookmarks.get("_Ref1")
    );

    // "Inserted before" occupies 17 positions.
    let delta = 17;
    for id in ["alpha", "beta"] {
        let mut shifted: Vec<FlowBlock> = blocks_for(&first, id).into_iter().cloned().collect();
        for block in &mut shifted {
            block.shift_positions(delta);
        }
        let now: Vec<FlowBlock> = blocks_for(&second, id).into_iter().cloned().collect();
        assert_eq!(shifted, now);
    }
}

#[test]
fn test_unchanged_document_reuses_every_paragraph() {
    let mut ids = Ids(0);
    let document = Document::new(vec![
        paragraph(&mut ids, Some("a"), "One"),
        paragraph(&mut ids, Some("b"), "Two"),
        paragraph(&mut ids, Some("c"), "Three"),
    ]);

    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::with_cache();
    let first = run_pass(&converter, &document, &mut state);
    let second = run_pass(&converter, &document, &mut state);

    assert_eq!(first.blocks, second.blocks);
    assert_eq!(first.stats.cache_misses, 3);
    assert_eq!(second.stats.cache_hits, 3);
}

#[test]
fn test_changed_content_is_reconverted() {
    let mut ids = Ids(0);
    let original = Document::new(vec![paragraph(&mut ids, Some("a"), "Draft")]);
    let edited = Document::new(vec![paragraph(&mut ids, Some("a"), "Final text")]);

    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::with_cache();
    run_pass(&converter, &original, &mut state);
    let result = run_pass(&converter, &edited, &mut state);

    assert_eq!(result.stats.cache_misses, 1);
    assert_eq!(
        docflow::render::to_text(&result.blocks),
        "Final text".to_string()
    );
}

#[test]
fn test_ambient_structured_content_is_part_of_the_key() {
    let mut ids = Ids(0);
    let text = paragraph(&mut ids, Some("toc-entry"), "Chapter 1");
    let plain = Document::new(vec![text.clone()]);
    let wrapped = Document::new(vec![DocumentNode::new(NodeKind::DocumentPartObject(SdtAttrs {
        gallery: Some("Table of Contents".into()),
        ..Default::default()
    }))
    .with_children(vec![text])
    .with_id(ids.next())]);

    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::with_cache();
    run_pass(&converter, &plain, &mut state);
    let result = run_pass(&converter, &wrapped, &mut state);

    assert_eq!(result.stats.cache_hits, 0);
    let paragraph = result.blocks[0].as_paragraph().unwrap();
    assert!(paragraph.attrs.sdt.is_some());
}

#[test]
fn test_removed_paragraphs_are_evicted() {
    let mut ids = Ids(0);
    let keep = paragraph(&mut ids, Some("keep"), "Stays");
    let drop = paragraph(&mut ids, Some("drop"), "Goes");

    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::with_cache();
    run_pass(&converter, &Document::new(vec![keep.clone(), drop]), &mut state);
    run_pass(&converter, &Document::new(vec![keep]), &mut state);

    let cache = state.cache.as_ref().unwrap();
    assert!(cache.contains("keep"));
    assert!(!cache.contains("drop"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_paragraphs_without_position_bypass_the_cache() {
    let document = Document::new(vec![DocumentNode::paragraph(
        ParagraphAttrs {
            stable_id: Some("floating".into()),
            ..Default::default()
        },
        vec![DocumentNode::text("No ids anywhere")],
    )]);

    let converter = FlowConverter::new(ConvertOptions::default());
    let mut state = ConversionState::with_cache();
    run_pass(&converter, &document, &mut state);
    let result = run_pass(&converter, &document, &mut state);

    assert_eq!(result.stats.cache_hits, 0);
    assert!(state.cache.as_ref().unwrap().is_empty());
}

fn footnoted_document(ids: &mut Ids, number: u32) -> Document {
    let footnote = DocumentNode::new(NodeKind::FootnoteReference(FootnoteReferenceAttrs {
        id: Some("7".into()),
    }))
    .with_id(ids.next());
    let paragraph = DocumentNode::paragraph(
        ParagraphAttrs {
            stable_id: Some("note".into()),
            ..Default::default()
        },
        vec![DocumentNode::text("Claim").with_id(ids.next()), footnote],
    )
    .with_id(ids.next());

    let mut document = Document::new(vec![paragraph]);
    document.context.footnote_numbers.insert("7".into(), number);
    document
}

#[test]
fn test_renumbered_footnotes_are_not_served_from_cache() {
    let mut ids = Ids(0);
    let mut flow = Docflow::new().with_cache();
    flow.convert(&footnoted_document(&mut ids, 1));

    let renumbered = footnoted_document(&mut ids, 2);
    let cached = flow.convert(&renumbered);
    let fresh = docflow::convert_document(&renumbered, &ConvertOptions::default());

    assert_eq!(cached.stats.cache_hits, 0);
    assert_eq!(cached.blocks, fresh.blocks);
    assert_eq!(docflow::render::to_text(&cached.blocks), "Claim\u{b2}".to_string());
}

#[test]
fn test_unchanged_context_still_hits() {
    let mut ids = Ids(0);
    let document = footnoted_document(&mut ids, 3);
    let mut flow = Docflow::new().with_cache();
    flow.convert(&document);

    let second = flow.convert(&document);
    assert_eq!(second.stats.cache_hits, 1);
}

#[test]
fn test_removed_bookmarks_do_not_survive_the_next_pass() {
    let mut ids = Ids(0);
    let kept = bookmarked_paragraph(&mut ids, "kept", "_Kept");
    let gone = bookmarked_paragraph(&mut ids, "gone", "_Gone");

    let converter = FlowConverter::new(ConvertOptions::default());
    let mut cached = ConversionState::with_cache();
    run_pass(&converter, &Document::new(vec![kept.clone(), gone]), &mut cached);
    assert!(cached.bookmarks.get("_Gone").is_some());

    let after = Document::new(vec![kept]);
    run_pass(&converter, &after, &mut cached);
    let mut fresh = ConversionState::new();
    run_pass(&converter, &after, &mut fresh);

    assert_eq!(cached.bookmarks.get("_Gone"), None);
    assert_eq!(cached.bookmarks.get("_Kept"), fresh.bookmarks.get("_Kept"));
    assert_eq!(cached.bookmarks.len(), fresh.bookmarks.len());
}
