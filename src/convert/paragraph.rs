//! Paragraph assembler.
//!
//! Converts one paragraph node into its flow blocks: an optional page break,
//! the paragraph blocks split around any block-level content found inside,
//! and that block-level content itself.

use log::trace;

use super::context::ResolvedParagraph;
use super::inline::{apply_properties, default_style};
use super::merge::merge_runs;
use super::tracked::filter_runs;
use super::visitor::{Inherited, ParagraphVisitor, Session};
use crate::model::{
    BreakBlock, DocumentNode, FlowBlock, ParagraphBlock, ParagraphBlockAttrs, PmRange, Run,
    SdtMetadata, TextRun,
};

/// Block attributes derived from a resolved paragraph.
fn block_attrs(resolved: &ResolvedParagraph, sdt: Option<&SdtMetadata>) -> ParagraphBlockAttrs {
    ParagraphBlockAttrs {
        style_id: resolved.style_id.clone(),
        alignment: resolved.alignment,
        spacing: resolved.spacing,
        indent: resolved.indent,
        tabs: resolved.tabs.clone(),
        keep_next: resolved.keep_next,
        keep_lines: resolved.keep_lines,
        rtl: resolved.rtl,
        numbering: resolved.numbering,
        sdt: sdt.cloned(),
        tracked_changes_mode: None,
        tracked_changes_enabled: None,
    }
}

/// Paragraph block holding one empty text run styled like the paragraph
/// mark, with a caret just inside the paragraph.
fn empty_paragraph(
    session: &Session<'_>,
    node: &DocumentNode,
    resolved: &ResolvedParagraph,
    id: String,
    attrs: ParagraphBlockAttrs,
) -> FlowBlock {
    let mut style = default_style(session);
    apply_properties(&mut style, &resolved.mark_properties, session);
    let mut run = TextRun::new("", style);
    run.pm_range = session
        .position(node)
        .map(|range| PmRange::caret(range.start.saturating_add(1)));
    run.sdt = attrs.sdt.clone();

    FlowBlock::Paragraph(ParagraphBlock {
        id,
        runs: vec![Run::Text(run)],
        attrs,
    })
}

/// Convert a paragraph node.
///
/// `base_id` names the first paragraph block; later parts of a paragraph
/// split by block content are `{base_id}-{n}`. Returns nothing for a node
/// that is not a paragraph, for a hidden empty paragraph, and for a
/// paragraph whose runs were all filtered out as tracked changes.
pub(crate) fn assemble(
    session: &mut Session<'_>,
    node: &DocumentNode,
    ambient_sdt: Option<&SdtMetadata>,
    base_id: &str,
) -> Vec<FlowBlock> {
    let Some(attrs) = node.as_paragraph() else {
        return Vec::new();
    };
    let resolved = session.styles.resolve_paragraph(attrs, session.context);
    let paragraph_attrs = block_attrs(&resolved, ambient_sdt);

    if node.children.is_empty() && resolved.is_hidden() {
        trace!("dropping hidden empty paragraph {base_id}");
        return Vec::new();
    }

    let mut blocks = Vec::new();
    if resolved.page_break_before {
        blocks.push(FlowBlock::PageBreak(BreakBlock {
            id: format!("{base_id}-page-break"),
            anchor_paragraph_id: Some(base_id.to_string()),
            break_type: Some("page".to_string()),
            pm_range: None,
        }));
    }

    if node.children.is_empty() {
        blocks.push(empty_paragraph(
            session,
            node,
            &resolved,
            base_id.to_string(),
            paragraph_attrs,
        ));
    } else {
        let mut visitor = ParagraphVisitor::new(&resolved, attrs, base_id, paragraph_attrs.clone());
        let root = Inherited::with_sdt(ambient_sdt.cloned()).descend(node);
        for child in &node.children {
            visitor.visit(session, child, &root);
        }
        visitor.flush();

        let synthetic = (!visitor.produced_paragraph() && !visitor.suppressed())
            .then(|| visitor.next_paragraph_id());
        blocks.extend(visitor.finish());
        if let Some(id) = synthetic {
            blocks.push(empty_paragraph(session, node, &resolved, id, paragraph_attrs));
        }
    }

    if session.options.merge_runs {
        for paragraph in blocks.iter_mut().filter_map(FlowBlock::as_paragraph_mut) {
            paragraph.runs = merge_runs(std::mem::take(&mut paragraph.runs));
        }
    }

    apply_tracked_changes(session, blocks)
}

/// Filter runs for the configured tracked changes view and tag the
/// surviving paragraph blocks.
fn apply_tracked_changes(session: &Session<'_>, blocks: Vec<FlowBlock>) -> Vec<FlowBlock> {
    let Some(config) = session.options.tracked_changes else {
        return blocks;
    };
    let active = session.options.active_tracked_mode();

    blocks
        .into_iter()
        .filter_map(|mut block| {
            let Some(paragraph) = block.as_paragraph_mut() else {
                return Some(block);
            };
            if let Some(mode) = active {
                let had_runs = !paragraph.runs.is_empty();
                paragraph.runs = filter_runs(std::mem::take(&mut paragraph.runs), mode);
                if had_runs && paragraph.runs.is_empty() {
                    trace!("paragraph block {} emptied by tracked changes", paragraph.id);
                    return None;
                }
            }
            paragraph.attrs.tracked_changes_mode = Some(config.mode);
            paragraph.attrs.tracked_changes_enabled = Some(config.enabled);
            Some(block)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::inline::testing::Fixture;
    use super::*;
    use crate::convert::options::TrackedChangesConfig;
    use crate::model::{
        BlockKind, ImageAttrs, ImageSize, Mark, NodeId, NodeKind, ParagraphAttrs, RunProperties,
        TrackedChangeAttrs, TrackedChangesMode, WrapSpec,
    };

    fn paragraph(children: Vec<DocumentNode>) -> DocumentNode {
        DocumentNode::paragraph(ParagraphAttrs::default(), children).with_id(1)
    }

    #[test]
    fn test_empty_paragraph_caret() {
        let mut fixture = Fixture::new();
        fixture.positions.insert(NodeId(1), PmRange::new(10, 12));
        let blocks = assemble(&mut fixture.session(), &paragraph(vec![]), None, "p");

        assert_eq!(blocks.len(), 1);
        let block = blocks[0].as_paragraph().unwrap();
        assert_eq!(block.id, "p");
        assert_eq!(block.runs.len(), 1);
        let run = block.runs[0].as_text().unwrap();
        assert_eq!(run.text, "");
        assert_eq!(run.pm_range, Some(PmRange::new(11, 11)));
    }

    #[test]
    fn test_hidden_empty_paragraph_dropped() {
        let mut fixture = Fixture::new();
        let node = DocumentNode::paragraph(
            ParagraphAttrs {
                page_break_before: Some(true),
                run_properties: Some(RunProperties {
                    vanish: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            },
            vec![],
        );
        assert!(assemble(&mut fixture.session(), &node, None, "p").is_empty());
    }

    #[test]
    fn test_page_break_before() {
        let mut fixture = Fixture::new();
        let node = DocumentNode::paragraph(
            ParagraphAttrs {
                page_break_before: Some(true),
                ..Default::default()
            },
            vec![DocumentNode::text("x")],
        );
        let blocks = assemble(&mut fixture.session(), &node, None, "p");
        let kinds: Vec<_> = blocks.iter().map(FlowBlock::kind).collect();
        assert_eq!(kinds, vec![BlockKind::PageBreak, BlockKind::Paragraph]);
    }

    #[test]
    fn test_block_image_splits_paragraph() {
        let mut fixture = Fixture::new();
        let image = DocumentNode::new(NodeKind::Image(ImageAttrs {
            src: Some("a.png".into()),
            size: Some(ImageSize {
                width: Some(10.0),
                height: Some(10.0),
            }),
            wrap: Some(WrapSpec {
                wrap_type: Some("Square".into()),
                ..Default::default()
            }),
            ..Default::default()
        }));
        let node = paragraph(vec![
            DocumentNode::text("before"),
            image,
            DocumentNode::text("after"),
        ]);

        let blocks = assemble(&mut fixture.session(), &node, None, "p");
        let ids: Vec<_> = blocks.iter().map(FlowBlock::id).collect();
        assert_eq!(ids, vec!["p", "p-block-0", "p-1"]);
        assert_eq!(blocks[1].anchor_paragraph_id(), Some("p"));
    }

    #[test]
    fn test_only_block_content_gets_synthetic_paragraph() {
        let mut fixture = Fixture::new();
        let image = DocumentNode::new(NodeKind::Image(ImageAttrs {
            wrap: Some(WrapSpec {
                wrap_type: Some("Square".into()),
                ..Default::default()
            }),
            ..Default::default()
        }));

        let blocks = assemble(&mut fixture.session(), &paragraph(vec![image]), None, "p");
        let kinds: Vec<_> = blocks.iter().map(FlowBlock::kind).collect();
        assert_eq!(kinds, vec![BlockKind::Image, BlockKind::Paragraph]);
        assert_eq!(blocks[1].id(), "p");
    }

    #[test]
    fn test_hidden_content_suppresses_fallback() {
        let mut fixture = Fixture::new();
        let hidden = DocumentNode::run(
            Some(RunProperties {
                vanish: Some(true),
                ..Default::default()
            }),
            vec![DocumentNode::text("secret")],
        );
        assert!(assemble(&mut fixture.session(), &paragraph(vec![hidden]), None, "p").is_empty());
    }

    #[test]
    fn test_deleted_only_paragraph_dropped_in_final_mode() {
        let mut fixture = Fixture::new();
        fixture.options.tracked_changes = Some(TrackedChangesConfig {
            enabled: true,
            mode: TrackedChangesMode::Final,
        });
        let deleted = DocumentNode::text("gone").with_mark(Mark::TrackDelete(TrackedChangeAttrs {
            id: "1".into(),
            ..Default::default()
        }));

        assert!(assemble(&mut fixture.session(), &paragraph(vec![deleted]), None, "p").is_empty());
    }

    #[test]
    fn test_tracked_attrs_set_when_disabled() {
        let mut fixture = Fixture::new();
        fixture.options.tracked_changes = Some(TrackedChangesConfig {
            enabled: false,
            mode: TrackedChangesMode::Original,
        });
        let inserted = DocumentNode::text("new").with_mark(Mark::TrackInsert(TrackedChangeAttrs {
            id: "2".into(),
            ..Default::default()
        }));

        let blocks = assemble(&mut fixture.session(), &paragraph(vec![inserted]), None, "p");
        let block = blocks[0].as_paragraph().unwrap();
        assert_eq!(block.runs.len(), 1);
        assert!(block.runs[0].tracked_change().is_some());
        assert_eq!(block.attrs.tracked_changes_mode, Some(TrackedChangesMode::Original));
        assert_eq!(block.attrs.tracked_changes_enabled, Some(false));
    }

    #[test]
    fn test_bold_and_plain_do_not_merge() {
        let mut fixture = Fixture::new();
        let hello = DocumentNode::text("Hello").with_id(2).with_mark(Mark::Bold);
        let world = DocumentNode::text(" World").with_id(3);
        fixture.positions.insert(NodeId(2), PmRange::new(1, 6));
        fixture.positions.insert(NodeId(3), PmRange::new(6, 12));

        let blocks = assemble(&mut fixture.session(), &paragraph(vec![hello, world]), None, "p");
        let runs = &blocks[0].as_paragraph().unwrap().runs;
        assert_eq!(runs.len(), 2);
        assert!(runs[0].as_text().unwrap().style.bold);
        assert_eq!(runs[1].as_text().unwrap().text, " World");
        assert!(!runs[1].as_text().unwrap().style.bold);
    }
}
