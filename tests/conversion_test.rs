//! Integration tests for whole-document conversion.

use pretty_assertions::assert_eq;

use docflow::model::{
    ImageAttrs, ImageSize, ImageVerticalAlign, NodeKind, ObjectFit, PageReferenceAttrs, PmRange,
    RunProperties, SectionProperties, SectionType, TokenKind, TrackedChangeAttrs, WrapSpec,
};
use docflow::{
    convert_document, convert_json, BlockKind, ConvertOptions, Document, DocumentNode, FlowBlock,
    Mark, ParagraphBlock, Run, TrackedChangesMode,
};

fn paragraph(stable_id: &str, children: Vec<DocumentNode>) -> DocumentNode {
    DocumentNode::paragraph(
        docflow::model::ParagraphAttrs {
            stable_id: Some(stable_id.to_string()),
            ..Default::default()
        },
        children,
    )
}

fn image(wrap_type: &str) -> DocumentNode {
    DocumentNode::new(NodeKind::Image(ImageAttrs {
        src: Some("media/chart.png".into()),
        size: Some(ImageSize {
            width: Some(300.0),
            height: Some(200.0),
        }),
        wrap: Some(WrapSpec {
            wrap_type: Some(wrap_type.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }))
}

fn kinds(blocks: &[FlowBlock]) -> Vec<BlockKind> {
    blocks.iter().map(FlowBlock::kind).collect()
}

fn only_paragraph(blocks: &[FlowBlock]) -> &ParagraphBlock {
    assert_eq!(blocks.len(), 1, "expected a single block, got {blocks:?}");
    blocks[0].as_paragraph().expect("paragraph block")
}

#[test]
fn test_every_visible_paragraph_yields_a_paragraph_block() {
    let document = Document::new(vec![
        paragraph("plain", vec![DocumentNode::text("Some text")]),
        paragraph("empty", vec![]),
        paragraph("floating", vec![image("Square")]),
        paragraph(
            "split",
            vec![
                DocumentNode::text("Before"),
                image("Tight"),
                DocumentNode::text("After"),
            ],
        ),
    ]);

    let result = convert_document(&document, &ConvertOptions::default());
    for id in ["plain", "empty", "floating", "split"] {
        let found = result
            .paragraphs()
            .any(|p| p.id == id || p.id.starts_with(&format!("{id}-")));
        assert!(found, "no paragraph block for {id}");
    }
    assert_eq!(result.stats.dropped_paragraph_count, 0);
}

#[test]
fn test_section_breaks_precede_first_paragraph_of_each_section() {
    let continuous = SectionProperties {
        section_type: SectionType::Continuous,
        ..Default::default()
    };
    let mut first = paragraph("s0", vec![DocumentNode::text("Section one")]);
    if let NodeKind::Paragraph(attrs) = &mut first.kind {
        attrs.section_properties = Some(SectionProperties::default());
    }
    let mut third = paragraph("s1b", vec![DocumentNode::text("Section two, end")]);
    if let NodeKind::Paragraph(attrs) = &mut third.kind {
        attrs.section_properties = Some(continuous.clone());
    }

    let document = Document::new(vec![
        first,
        paragraph("s1a", vec![DocumentNode::text("Section two")]),
        third,
        paragraph("s2", vec![DocumentNode::text("Section three")]),
    ])
    .with_body_section(SectionProperties::default());

    let result = convert_document(&document, &ConvertOptions::default());
    assert_eq!(
        kinds(&result.blocks),
        vec![
            BlockKind::Paragraph,
            BlockKind::SectionBreak,
            BlockKind::Paragraph,
            BlockKind::Paragraph,
            BlockKind::SectionBreak,
            BlockKind::Paragraph,
        ]
    );
    assert_eq!(result.stats.count(BlockKind::SectionBreak), 2);

    let FlowBlock::SectionBreak(into_second) = &result.blocks[1] else {
        panic!("expected a section break");
    };
    assert_eq!(into_second.section_index, 1);
    assert_eq!(into_second.section_type, SectionType::Continuous);
    assert!(!into_second.requires_page_boundary);

    let FlowBlock::SectionBreak(into_third) = &result.blocks[4] else {
        panic!("expected a section break");
    };
    assert_eq!(into_third.section_index, 2);
    assert!(into_third.requires_page_boundary);
    assert_eq!(result.blocks[5].id(), "s2");
}

#[test]
fn test_single_section_has_no_break() {
    let document = Document::new(vec![
        paragraph("a", vec![DocumentNode::text("One")]),
        paragraph("b", vec![DocumentNode::text("Two")]),
    ]);

    let result = convert_document(&document, &ConvertOptions::default());
    assert_eq!(result.stats.count(BlockKind::SectionBreak), 0);
}

#[test]
fn test_empty_paragraph_places_caret_inside() {
    let document = Document::new(vec![
        paragraph("first", vec![DocumentNode::text("abc").with_id(2)]).with_id(1),
        paragraph("empty", vec![]).with_id(3),
    ]);

    let result = convert_document(&document, &ConvertOptions::default());
    let empty = result.blocks[1].as_paragraph().unwrap();
    assert_eq!(empty.runs.len(), 1);

    let run = empty.runs[0].as_text().unwrap();
    assert_eq!(run.text, "");
    // "first" spans 0..5, so "empty" opens at 5.
    assert_eq!(run.pm_range, Some(PmRange::new(6, 6)));
}

#[test]
fn test_style_mismatch_prevents_merge() {
    let document = Document::new(vec![paragraph(
        "p",
        vec![
            DocumentNode::text("Hello").with_mark(Mark::Bold).with_id(2),
            DocumentNode::text(" World").with_id(3),
        ],
    )
    .with_id(1)]);

    let result = convert_document(&document, &ConvertOptions::default());
    let runs: Vec<_> = only_paragraph(&result.blocks)
        .runs
        .iter()
        .map(|run| {
            let text = run.as_text().unwrap();
            (text.text.as_str(), text.style.bold)
        })
        .collect();
    assert_eq!(runs, vec![("Hello", true), (" World", false)]);
}

#[test]
fn test_contiguous_plain_runs_merge() {
    let document = Document::new(vec![paragraph(
        "p",
        vec![
            DocumentNode::text("Hello").with_id(2),
            DocumentNode::text(" World").with_id(3),
        ],
    )
    .with_id(1)]);

    let merged = convert_document(&document, &ConvertOptions::default());
    let runs = &only_paragraph(&merged.blocks).runs;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].plain_text(), "Hello World");
    assert_eq!(runs[0].pm_range(), Some(PmRange::new(1, 12)));

    let unmerged = convert_document(&document, &ConvertOptions::new().with_merge_runs(false));
    assert_eq!(only_paragraph(&unmerged.blocks).runs.len(), 2);
}

#[test]
fn test_inline_image_becomes_image_run() {
    let document = Document::new(vec![paragraph("p", vec![image("Inline")])]);

    let result = convert_document(&document, &ConvertOptions::default());
    let Run::Image(run) = &only_paragraph(&result.blocks).runs[0] else {
        panic!("expected an image run");
    };
    assert_eq!(run.width, 300.0);
    assert_eq!(run.height, 200.0);
    assert_eq!(run.vertical_align, ImageVerticalAlign::Bottom);
}

#[test]
fn test_floating_image_becomes_image_block() {
    let document = Document::new(vec![paragraph("p", vec![image("Square")])]);

    let result = convert_document(&document, &ConvertOptions::default());
    assert_eq!(
        kinds(&result.blocks),
        vec![BlockKind::Image, BlockKind::Paragraph]
    );

    let FlowBlock::Image(block) = &result.blocks[0] else {
        panic!("expected an image block");
    };
    assert_eq!(block.object_fit, ObjectFit::Contain);
    assert_eq!(block.anchor_paragraph_id.as_deref(), Some("p"));
    assert_eq!((block.width, block.height), (300.0, 200.0));
    assert!(block.wrap.is_some());
}

#[test]
fn test_page_reference_without_content_reserves_width() {
    let instruction = r"PAGEREF _Toc99 \h";
    let document = Document::new(vec![paragraph(
        "toc",
        vec![DocumentNode::new(NodeKind::PageReference(PageReferenceAttrs {
            instruction: Some(instruction.to_string()),
        }))],
    )]);

    let result = convert_document(&document, &ConvertOptions::default());
    let run = only_paragraph(&result.blocks).runs[0].as_text().unwrap();
    assert_eq!(run.text, "??");
    assert_eq!(run.token, Some(TokenKind::PageReference));

    let metadata = run.page_ref_metadata.as_ref().unwrap();
    assert_eq!(metadata.bookmark_id, "_Toc99");
    assert_eq!(metadata.instruction, instruction);
}

#[test]
fn test_final_view_drops_deleted_only_paragraph() {
    let deletion = Mark::TrackDelete(TrackedChangeAttrs {
        id: "7".into(),
        author: Some("Reviewer".into()),
        ..Default::default()
    });
    let document = Document::new(vec![paragraph(
        "gone",
        vec![DocumentNode::text("removed").with_mark(deletion)],
    )]);

    let options = ConvertOptions::new().with_tracked_changes(TrackedChangesMode::Final);
    let result = convert_document(&document, &options);
    assert!(result.blocks.is_empty());
    assert_eq!(result.stats.dropped_paragraph_count, 1);

    let review = ConvertOptions::new().with_tracked_changes(TrackedChangesMode::Review);
    let result = convert_document(&document, &review);
    let block = only_paragraph(&result.blocks);
    assert_eq!(block.attrs.tracked_changes_mode, Some(TrackedChangesMode::Review));
    assert_eq!(block.attrs.tracked_changes_enabled, Some(true));
    assert!(block.runs[0].as_text().unwrap().tracked_change.is_some());
}

#[test]
fn test_hidden_paragraph_is_suppressed() {
    let mut hidden = paragraph("hidden", vec![]);
    if let NodeKind::Paragraph(attrs) = &mut hidden.kind {
        attrs.run_properties = Some(RunProperties {
            vanish: Some(true),
            ..Default::default()
        });
    }
    let document = Document::new(vec![hidden, paragraph("shown", vec![DocumentNode::text("x")])]);

    let result = convert_document(&document, &ConvertOptions::default());
    assert_eq!(result.blocks.len(), 1);
    assert_eq!(result.blocks[0].id(), "shown");
}

#[test]
fn test_convert_json_document() {
    let json = r#"{
        "content": [
            {"type": "paragraph", "stableId": "intro", "children": [
                {"type": "text", "text": "Hello ", "marks": [{"type": "italic"}]},
                {"type": "text", "text": "world"}
            ]},
            {"type": "lineBreak", "breakType": "page"},
            {"type": "paragraph", "children": []}
        ]
    }"#;

    let result = convert_json(json, &ConvertOptions::default()).unwrap();
    assert_eq!(
        kinds(&result.blocks),
        vec![BlockKind::Paragraph, BlockKind::PageBreak, BlockKind::Paragraph]
    );
    assert_eq!(result.blocks[0].id(), "intro");
    assert_eq!(result.blocks[1].id(), "0-page-break");
    assert_eq!(result.blocks[2].id(), "1-paragraph");
    assert_eq!(docflow::render::to_text(&result.blocks), "Hello world\n");
}
