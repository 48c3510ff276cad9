//! Dispatch registry mapping node tags to converters.
//!
//! Each tag may have an inline converter (node to run), a block converter
//! (node to flow blocks) and an eligibility check guarding the block path.
//! Paragraphs are not dispatched through the registry; the paragraph
//! assembler owns them.

use std::collections::HashMap;

use super::block;
use super::context::ResolvedParagraph;
use super::inline;
use super::visitor::{Inherited, Session};
use crate::model::{DocumentNode, FlowBlock, NodeTag, ParagraphAttrs, Run};

/// Result of an inline conversion attempt.
///
/// `NotInline` and `HiddenByVanish` are expected outcomes handled by every
/// caller, not failures.
#[derive(Debug, Clone)]
pub enum InlineOutcome {
    /// The node produced a run.
    Run(Run),
    /// The node produced nothing itself; visit its children with the given
    /// inherited state.
    Descend(Inherited),
    /// The node produced nothing and its children are not visited.
    Done,
    /// The node must be converted by its block converter.
    NotInline,
    /// The node and its subtree are hidden text.
    HiddenByVanish,
}

/// Input of an inline converter.
#[derive(Debug, Clone, Copy)]
pub struct InlineInput<'n> {
    /// Node being converted
    pub node: &'n DocumentNode,
    /// State inherited from ancestors
    pub inherited: &'n Inherited,
    /// Resolved properties of the enclosing paragraph
    pub paragraph: &'n ResolvedParagraph,
    /// Number of tab runs produced so far in the paragraph
    pub tab_ordinal: u32,
}

/// Input of a block converter.
#[derive(Debug, Clone)]
pub struct BlockInput<'n> {
    /// Node being converted
    pub node: &'n DocumentNode,
    /// State inherited from ancestors
    pub inherited: &'n Inherited,
    /// Authored attributes of the enclosing paragraph, if any
    pub paragraph: Option<&'n ParagraphAttrs>,
    /// Id for the first emitted block
    pub id: String,
}

/// Node to run converter.
pub type InlineConverter = fn(&InlineInput<'_>, &mut Session<'_>) -> InlineOutcome;

/// Node to flow blocks converter.
pub type BlockConverter = fn(&BlockInput<'_>, &mut Session<'_>) -> Vec<FlowBlock>;

/// Guard deciding whether a node may take the block path.
pub type EligibilityCheck = fn(&DocumentNode, &Session<'_>) -> bool;

/// Converters registered for one node tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConverterEntry {
    /// Inline converter
    pub inline: Option<InlineConverter>,
    /// Block converter
    pub block: Option<BlockConverter>,
    /// Block path guard
    pub eligible: Option<EligibilityCheck>,
}

impl ConverterEntry {
    /// Entry with only an inline converter.
    pub fn inline(converter: InlineConverter) -> Self {
        Self {
            inline: Some(converter),
            ..Default::default()
        }
    }

    /// Entry with only a block converter.
    pub fn block(converter: BlockConverter) -> Self {
        Self {
            block: Some(converter),
            ..Default::default()
        }
    }

    /// Add a block converter.
    pub fn with_block(mut self, converter: BlockConverter) -> Self {
        self.block = Some(converter);
        self
    }

    /// Add an eligibility check.
    pub fn with_eligibility(mut self, check: EligibilityCheck) -> Self {
        self.eligible = Some(check);
        self
    }
}

/// Registry of node converters.
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    entries: HashMap<NodeTag, ConverterEntry>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NodeTag::Text, ConverterEntry::inline(inline::text::convert_text));
        registry.register(NodeTag::Tab, ConverterEntry::inline(inline::tab::convert_tab));
        registry.register(NodeTag::Token, ConverterEntry::inline(inline::text::convert_token));
        registry.register(
            NodeTag::FootnoteReference,
            ConverterEntry::inline(inline::text::convert_footnote_reference),
        );
        registry.register(
            NodeTag::Image,
            ConverterEntry::inline(inline::image::convert_image)
                .with_block(block::image::convert_image_block)
                .with_eligibility(block::image::is_block_eligible),
        );
        registry.register(
            NodeTag::FieldAnnotation,
            ConverterEntry::inline(inline::field::convert_field_annotation),
        );
        registry.register(
            NodeTag::PageReference,
            ConverterEntry::inline(inline::reference::convert_page_reference),
        );
        registry.register(
            NodeTag::BookmarkStart,
            ConverterEntry::inline(inline::reference::convert_bookmark_start),
        );
        registry.register(
            NodeTag::StructuredContent,
            ConverterEntry::inline(inline::container::convert_structured_content),
        );
        registry.register(
            NodeTag::Run,
            ConverterEntry::inline(inline::container::convert_run_container),
        );
        registry.register(
            NodeTag::LineBreak,
            ConverterEntry::inline(inline::text::convert_line_break)
                .with_block(block::breaks::convert_break),
        );
        registry.register(NodeTag::Table, ConverterEntry::block(block::table::convert_table));
        registry.register(NodeTag::Shape, ConverterEntry::block(block::drawing::convert_shape));
        registry.register(
            NodeTag::ContentBlock,
            ConverterEntry::block(block::drawing::convert_content_block),
        );
        registry
    }

    /// Register converters for a tag, replacing any previous entry.
    pub fn register(&mut self, tag: NodeTag, entry: ConverterEntry) {
        self.entries.insert(tag, entry);
    }

    /// Remove the converters for a tag.
    pub fn unregister(&mut self, tag: NodeTag) -> Option<ConverterEntry> {
        self.entries.remove(&tag)
    }

    /// Get the converters for a tag.
    pub fn get(&self, tag: NodeTag) -> Option<&ConverterEntry> {
        self.entries.get(&tag)
    }

    /// Check if a tag has converters.
    pub fn supports(&self, tag: NodeTag) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Registered tags in tag order.
    pub fn tags(&self) -> Vec<NodeTag> {
        let mut tags: Vec<_> = self.entries.keys().copied().collect();
        tags.sort();
        tags
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
