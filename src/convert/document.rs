//! Document orchestrator and streaming driver.
//!
//! [`FlowConverter`] walks the top-level nodes of a [`Document`] in order.
//! Paragraphs go through the section tracker, the flow block cache and the
//! paragraph assembler; block-level structured content is unwrapped with
//! its metadata passed down; everything else goes to its block converter.
//!
//! # Example
//!
//! ```
//! use docflow::convert::{ConversionInput, ConversionState, ConvertOptions, FlowConverter};
//! use docflow::model::{Document, DocumentNode, ParagraphAttrs};
//!
//! let document = Document::new(vec![DocumentNode::paragraph(
//!     ParagraphAttrs::default(),
//!     vec![DocumentNode::text("Hello")],
//! )]);
//! let converter = FlowConverter::new(ConvertOptions::default());
//! let mut state = ConversionState::new();
//!
//! let result = converter.convert(ConversionInput::new(&document), &mut state);
//! assert_eq!(result.blocks.len(), 1);
//! ```

use log::{debug, trace};

use super::block::table::sdt_kind;
use super::cache::{CacheLookup, FlowBlockCache};
use super::context::{
    BookmarkTable, DirectStyleResolver, NoPositions, PositionLookup, StyleResolver,
};
use super::options::ConvertOptions;
use super::paragraph::assemble;
use super::registry::{BlockInput, ConverterRegistry};
use super::section::{analyze_section_ranges, SectionTracker};
use super::visitor::{BlockIdGenerator, Inherited, Session};
use crate::error::{Error, Result};
use crate::model::{
    BlockKind, Document, DocumentNode, FlowBlock, NodeKind, ParagraphAttrs, SdtMetadata,
};
use crate::render::{BlockObserver, ConversionResult, ConversionStats};

/// What a conversion pass reads.
#[derive(Clone, Copy)]
pub struct ConversionInput<'a> {
    /// The document tree
    pub document: &'a Document,
    /// Node positions
    pub positions: &'a dyn PositionLookup,
    /// Style resolver
    pub styles: &'a dyn StyleResolver,
}

impl<'a> ConversionInput<'a> {
    /// Input without positions, resolving styles directly.
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            positions: &NoPositions,
            styles: &DirectStyleResolver,
        }
    }

    /// Use a position lookup.
    pub fn with_positions(mut self, positions: &'a dyn PositionLookup) -> Self {
        self.positions = positions;
        self
    }

    /// Use a style resolver.
    pub fn with_styles(mut self, styles: &'a dyn StyleResolver) -> Self {
        self.styles = styles;
        self
    }
}

/// Mutable state owned by the caller and carried across passes.
#[derive(Debug, Clone, Default)]
pub struct ConversionState {
    /// Bookmark name to start offset, rebuilt on every pass
    pub bookmarks: BookmarkTable,
    /// Flow block cache, if caching is wanted
    pub cache: Option<FlowBlockCache>,
}

impl ConversionState {
    /// State without a cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with an empty flow block cache.
    pub fn with_cache() -> Self {
        Self {
            bookmarks: BookmarkTable::new(),
            cache: Some(FlowBlockCache::new()),
        }
    }
}

/// Events emitted while streaming a conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// Conversion has started.
    DocumentStart {
        /// Number of top-level nodes
        node_count: usize,
        /// Number of sections
        section_count: usize,
    },

    /// Blocks produced by one top-level node, possibly none.
    Blocks {
        /// Index of the top-level node
        node_index: usize,
        /// Blocks in document order
        blocks: Vec<FlowBlock>,
    },

    /// Conversion has completed.
    DocumentEnd {
        /// Statistics for the pass
        stats: ConversionStats,
    },
}

impl FlowEvent {
    /// Blocks carried by the event, if any.
    pub fn blocks(&self) -> Option<&[FlowBlock]> {
        match self {
            FlowEvent::Blocks { blocks, .. } => Some(blocks),
            _ => None,
        }
    }

    /// Check if this is a document boundary event.
    pub fn is_document_boundary(&self) -> bool {
        matches!(
            self,
            FlowEvent::DocumentStart { .. } | FlowEvent::DocumentEnd { .. }
        )
    }
}

/// Converts document trees into flow blocks.
#[derive(Debug, Clone)]
pub struct FlowConverter {
    registry: ConverterRegistry,
    options: ConvertOptions,
}

impl Default for FlowConverter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

impl FlowConverter {
    /// Converter with the built-in converters.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            registry: ConverterRegistry::with_defaults(),
            options,
        }
    }

    /// Converter with a custom registry.
    ///
    /// Fails with [`Error::MissingConverters`] when the registry is empty.
    pub fn with_registry(registry: ConverterRegistry, options: ConvertOptions) -> Result<Self> {
        if registry.is_empty() {
            return Err(Error::MissingConverters);
        }
        Ok(Self { registry, options })
    }

    /// Conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converter registry.
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Stream the conversion one top-level node at a time.
    pub fn stream<'a>(
        &'a self,
        input: ConversionInput<'a>,
        state: &'a mut ConversionState,
    ) -> FlowStream<'a> {
        FlowStream::new(self, input, state)
    }

    /// Convert a whole document.
    pub fn convert(&self, input: ConversionInput<'_>, state: &mut ConversionState) -> ConversionResult {
        let mut observer = crate::render::NoopObserver;
        self.convert_with_observer(input, state, &mut observer)
    }

    /// Convert a whole document, reporting every block to `observer`.
    pub fn convert_with_observer(
        &self,
        input: ConversionInput<'_>,
        state: &mut ConversionState,
        observer: &mut dyn BlockObserver,
    ) -> ConversionResult {
        let mut blocks = Vec::new();
        let mut stats = ConversionStats::default();

        for event in self.stream(input, state) {
            match event {
                FlowEvent::DocumentStart { .. } => observer.on_document_start(),
                FlowEvent::Blocks { blocks: produced, .. } => {
                    for block in &produced {
                        observer.record(block.kind(), block);
                    }
                    blocks.extend(produced);
                }
                FlowEvent::DocumentEnd { stats: final_stats } => {
                    observer.on_document_end();
                    stats = final_stats;
                }
            }
        }

        ConversionResult::new(blocks, stats)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamStage {
    Initial,
    Nodes { next: usize },
    Done,
}

/// Iterator over the [`FlowEvent`]s of one conversion pass.
pub struct FlowStream<'a> {
    converter: &'a FlowConverter,
    input: ConversionInput<'a>,
    state: &'a mut ConversionState,
    ids: BlockIdGenerator,
    sections: SectionTracker,
    stats: ConversionStats,
    stage: StreamStage,
}

impl<'a> FlowStream<'a> {
    fn new(
        converter: &'a FlowConverter,
        input: ConversionInput<'a>,
        state: &'a mut ConversionState,
    ) -> Self {
        Self {
            converter,
            input,
            state,
            ids: BlockIdGenerator::new(),
            sections: SectionTracker::new(analyze_section_ranges(input.document)),
            stats: ConversionStats::new(),
            stage: StreamStage::Initial,
        }
    }

    /// Check if the pass is complete.
    pub fn is_done(&self) -> bool {
        self.stage == StreamStage::Done
    }

    /// Statistics so far.
    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    fn session(&mut self) -> Session<'_> {
        Session {
            options: &self.converter.options,
            registry: &self.converter.registry,
            context: &self.input.document.context,
            positions: self.input.positions,
            styles: self.input.styles,
            bookmarks: &mut self.state.bookmarks,
            ids: &mut self.ids,
        }
    }

    fn convert_node(&mut self, node: &DocumentNode, sdt: Option<&SdtMetadata>) -> Vec<FlowBlock> {
        match &node.kind {
            NodeKind::Paragraph(attrs) => self.convert_paragraph(node, attrs, sdt),
            NodeKind::StructuredContentBlock(attrs)
            | NodeKind::DocumentPartObject(attrs)
            | NodeKind::Index(attrs) => {
                let own = SdtMetadata::from_attrs(sdt_kind(&node.kind), attrs);
                let resolved = SdtMetadata::resolve(own, sdt);
                let mut blocks = Vec::new();
                for child in &node.children {
                    blocks.extend(self.convert_node(child, resolved.as_ref()));
                }
                blocks
            }
            _ => self.convert_other(node, sdt),
        }
    }

    fn convert_other(&mut self, node: &DocumentNode, sdt: Option<&SdtMetadata>) -> Vec<FlowBlock> {
        let tag = node.tag();
        let Some(entry) = self.converter.registry.get(tag).copied() else {
            debug!("no converter for top-level {tag:?} node, dropping");
            return Vec::new();
        };
        let Some(convert) = entry.block else {
            debug!("{tag:?} has no block converter, dropping top-level node");
            return Vec::new();
        };

        let mut session = self.session();
        if let Some(eligible) = entry.eligible {
            if !eligible(node, &session) {
                trace!("top-level {tag:?} node not eligible as a block");
                return Vec::new();
            }
        }

        let id = session.ids.next_id(block_kind_hint(node));
        let inherited = Inherited::with_sdt(sdt.cloned());
        let input = BlockInput {
            node,
            inherited: &inherited,
            paragraph: None,
            id,
        };
        convert(&input, &mut session)
    }

    fn convert_paragraph(
        &mut self,
        node: &DocumentNode,
        attrs: &ParagraphAttrs,
        sdt: Option<&SdtMetadata>,
    ) -> Vec<FlowBlock> {
        let mut output: Vec<FlowBlock> = self.sections.before_paragraph().into_iter().collect();

        let base_id = match &attrs.stable_id {
            Some(id) => id.clone(),
            None => self.ids.next_id(BlockKind::Paragraph),
        };
        let start = self.input.positions.position(node).map(|range| range.start);

        let lookup = match (attrs.stable_id.as_deref(), start, self.state.cache.as_mut()) {
            (Some(id), Some(start), Some(cache)) => {
                cache.lookup(id, node, sdt, start, &mut self.state.bookmarks)
            }
            _ => CacheLookup::Uncacheable,
        };

        let blocks = match lookup {
            CacheLookup::Hit(blocks) => {
                self.stats.add_cache_hit();
                blocks
            }
            CacheLookup::Miss(key) => {
                self.state.bookmarks.begin_capture();
                let blocks = assemble(&mut self.session(), node, sdt, &base_id);
                let captured = self.state.bookmarks.end_capture();
                if let (Some(cache), Some(start)) = (self.state.cache.as_mut(), start) {
                    cache.store(base_id.as_str(), key, start, blocks.clone(), captured);
                }
                self.stats.add_cache_miss();
                blocks
            }
            CacheLookup::Uncacheable => assemble(&mut self.session(), node, sdt, &base_id),
        };

        trace!("paragraph {base_id} produced {} blocks", blocks.len());
        self.stats.add_paragraph(!blocks.is_empty());
        self.sections.after_paragraph();
        output.extend(blocks);
        output
    }
}

/// Kind used to name a top-level block before it is converted.
fn block_kind_hint(node: &DocumentNode) -> BlockKind {
    match &node.kind {
        NodeKind::Table(_) => BlockKind::Table,
        NodeKind::Image(_) => BlockKind::Image,
        NodeKind::LineBreak(attrs) if attrs.break_type.as_deref() == Some("column") => {
            BlockKind::ColumnBreak
        }
        NodeKind::LineBreak(_) => BlockKind::PageBreak,
        _ => BlockKind::Drawing,
    }
}

impl Iterator for FlowStream<'_> {
    type Item = FlowEvent;

    fn next(&mut self) -> Option<FlowEvent> {
        match self.stage {
            StreamStage::Initial => {
                self.state.bookmarks.clear();
                if let Some(cache) = self.state.cache.as_mut() {
                    cache.begin_pass(&self.input.document.context);
                }
                self.stage = StreamStage::Nodes { next: 0 };
                Some(FlowEvent::DocumentStart {
                    node_count: self.input.document.content.len(),
                    section_count: self.sections.ranges().len(),
                })
            }
            StreamStage::Nodes { next } => {
                let document = self.input.document;
                let Some(node) = document.content.get(next) else {
                    if let Some(cache) = self.state.cache.as_mut() {
                        cache.end_pass();
                    }
                    self.stage = StreamStage::Done;
                    return Some(FlowEvent::DocumentEnd {
                        stats: std::mem::take(&mut self.stats),
                    });
                };

                let blocks = self.convert_node(node, None);
                for block in &blocks {
                    self.stats.record(block.kind(), block);
                }
                self.stage = StreamStage::Nodes { next: next + 1 };
                Some(FlowEvent::Blocks {
                    node_index: next,
                    blocks,
                })
            }
            StreamStage::Done => None,
        }
    }
}
