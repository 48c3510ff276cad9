//! Paragraph-level node visitor.
//!
//! The visitor walks a paragraph's subtree depth first, dispatching each
//! node through the [`ConverterRegistry`]. Marks, run properties, SDT
//! metadata and the hidden flag travel down as an explicit [`Inherited`]
//! value; siblings never observe each other's state.

use std::collections::BTreeMap;

use log::{debug, trace};

use super::context::{
    BookmarkTable, ConverterContext, PositionLookup, ResolvedParagraph, StyleResolver,
};
use super::options::ConvertOptions;
use super::registry::{BlockInput, ConverterEntry, ConverterRegistry, InlineInput, InlineOutcome};
use crate::model::{
    BlockKind, DocumentNode, FlowBlock, Mark, NodeTag, ParagraphAttrs, ParagraphBlock,
    ParagraphBlockAttrs, PmRange, Run, RunProperties, SdtMetadata,
};

/// State passed from a node to its descendants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inherited {
    /// Marks of all ancestors, outermost first
    pub marks: Vec<Mark>,
    /// Active structured content
    pub sdt: Option<SdtMetadata>,
    /// Resolved properties of the enclosing run container
    pub run_properties: Option<RunProperties>,
    /// `data-*` attributes of enclosing run containers
    pub data_attrs: BTreeMap<String, String>,
    /// The subtree is hidden text
    pub hidden: bool,
}

impl Inherited {
    /// Root state carrying only structured content metadata.
    pub fn with_sdt(sdt: Option<SdtMetadata>) -> Self {
        Self {
            sdt,
            ..Default::default()
        }
    }

    /// State for the children of `node`: its marks are appended.
    pub fn descend(&self, node: &DocumentNode) -> Self {
        let mut next = self.clone();
        next.marks.extend(node.marks.iter().cloned());
        next
    }

    /// Marks that apply to `node`: inherited ones first, then its own.
    pub fn marks_for<'a>(&'a self, node: &'a DocumentNode) -> impl Iterator<Item = &'a Mark> {
        self.marks.iter().chain(node.marks.iter())
    }
}

/// Generator of document-wide block ids (`{n}-{kind}`).
#[derive(Debug, Clone, Default)]
pub struct BlockIdGenerator {
    next: usize,
}

impl BlockIdGenerator {
    /// Create a generator starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for a block of `kind`.
    pub fn next_id(&mut self, kind: BlockKind) -> String {
        let id = format!("{}-{}", self.next, kind);
        self.next += 1;
        id
    }
}

/// Everything a converter may consult or mutate during one pass.
pub struct Session<'a> {
    /// Conversion options
    pub options: &'a ConvertOptions,
    /// Converter registry
    pub registry: &'a ConverterRegistry,
    /// Styling context
    pub context: &'a ConverterContext,
    /// Position lookup
    pub positions: &'a dyn PositionLookup,
    /// Style resolver
    pub styles: &'a dyn StyleResolver,
    /// Bookmark table, owned by the caller
    pub bookmarks: &'a mut BookmarkTable,
    /// Document-wide id generator
    pub ids: &'a mut BlockIdGenerator,
}

impl Session<'_> {
    /// Span of a node.
    pub fn position(&self, node: &DocumentNode) -> Option<PmRange> {
        self.positions.position(node)
    }
}

/// Collects the blocks of one paragraph.
pub(crate) struct ParagraphVisitor<'p> {
    paragraph: &'p ResolvedParagraph,
    attrs: &'p ParagraphAttrs,
    base_id: &'p str,
    block_attrs: ParagraphBlockAttrs,
    pending: Vec<Run>,
    blocks: Vec<FlowBlock>,
    part_index: usize,
    nested_index: usize,
    tab_ordinal: u32,
    produced_paragraph: bool,
    suppressed: bool,
}

impl<'p> ParagraphVisitor<'p> {
    pub(crate) fn new(
        paragraph: &'p ResolvedParagraph,
        attrs: &'p ParagraphAttrs,
        base_id: &'p str,
        block_attrs: ParagraphBlockAttrs,
    ) -> Self {
        Self {
            paragraph,
            attrs,
            base_id,
            block_attrs,
            pending: Vec::new(),
            blocks: Vec::new(),
            part_index: 0,
            nested_index: 0,
            tab_ordinal: 0,
            produced_paragraph: false,
            suppressed: false,
        }
    }

    /// Visit one node.
    pub(crate) fn visit(
        &mut self,
        session: &mut Session<'_>,
        node: &DocumentNode,
        inherited: &Inherited,
    ) {
        let tag = node.tag();
        if inherited.hidden && tag != NodeTag::Run {
            self.suppressed = true;
            return;
        }
        trace!("visiting {tag:?} node");

        let Some(entry) = session.registry.get(tag).copied() else {
            debug!("no converter registered for {tag:?}, visiting children");
            let next = inherited.descend(node);
            self.visit_children(session, node, &next);
            return;
        };

        if tag == NodeTag::Shape {
            self.emit_block(session, node, inherited, &entry);
            return;
        }

        let Some(inline) = entry.inline else {
            self.emit_block(session, node, inherited, &entry);
            return;
        };

        let input = InlineInput {
            node,
            inherited,
            paragraph: self.paragraph,
            tab_ordinal: self.tab_ordinal,
        };
        match inline(&input, session) {
            InlineOutcome::Run(run) => {
                if matches!(run, Run::Tab(_)) {
                    self.tab_ordinal += 1;
                }
                self.pending.push(run);
            }
            InlineOutcome::Descend(next) => self.visit_children(session, node, &next),
            InlineOutcome::Done => {}
            InlineOutcome::HiddenByVanish => {
                trace!("{tag:?} subtree hidden by vanish");
                self.suppressed = true;
            }
            InlineOutcome::NotInline => self.emit_block(session, node, inherited, &entry),
        }
    }

    fn visit_children(
        &mut self,
        session: &mut Session<'_>,
        node: &DocumentNode,
        inherited: &Inherited,
    ) {
        for child in &node.children {
            self.visit(session, child, inherited);
        }
    }

    fn emit_block(
        &mut self,
        session: &mut Session<'_>,
        node: &DocumentNode,
        inherited: &Inherited,
        entry: &ConverterEntry,
    ) {
        let tag = node.tag();
        let Some(convert) = entry.block else {
            debug!("{tag:?} node is not inline and has no block converter, dropping");
            return;
        };
        if let Some(eligible) = entry.eligible {
            if !eligible(node, session) {
                debug!("{tag:?} node not eligible for block conversion, dropping");
                return;
            }
        }

        self.flush();
        let input = BlockInput {
            node,
            inherited,
            paragraph: Some(self.attrs),
            id: format!("{}-block-{}", self.base_id, self.nested_index),
        };
        self.nested_index += 1;

        for mut block in convert(&input, session) {
            block.set_anchor_paragraph_id(self.base_id);
            self.blocks.push(block);
        }
    }

    /// Turn pending runs into a paragraph block.
    pub(crate) fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let id = self.next_paragraph_id();
        let runs = std::mem::take(&mut self.pending);
        self.blocks.push(FlowBlock::Paragraph(ParagraphBlock {
            id,
            runs,
            attrs: self.block_attrs.clone(),
        }));
        self.produced_paragraph = true;
    }

    /// Id of the next paragraph block of this paragraph: the base id first,
    /// then `{base}-{n}` for later parts.
    pub(crate) fn next_paragraph_id(&mut self) -> String {
        let id = if self.part_index == 0 {
            self.base_id.to_string()
        } else {
            format!("{}-{}", self.base_id, self.part_index)
        };
        self.part_index += 1;
        id
    }

    /// Whether a paragraph block has been produced.
    pub(crate) fn produced_paragraph(&self) -> bool {
        self.produced_paragraph
    }

    /// Whether any content was suppressed as hidden.
    pub(crate) fn suppressed(&self) -> bool {
        self.suppressed
    }

    /// Flush and return the collected blocks.
    pub(crate) fn finish(mut self) -> Vec<FlowBlock> {
        self.flush();
        self.blocks
    }
}
