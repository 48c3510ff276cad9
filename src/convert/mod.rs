//! Conversion of document trees into flow blocks.
//!
//! Per node tag a [`ConverterRegistry`] holds an inline converter (node to
//! runs), a block converter (node to whole blocks) and an optional guard
//! deciding which path applies. [`FlowConverter`] drives a pass over a
//! [`Document`](crate::model::Document): paragraphs are assembled by a
//! visitor that walks inline content, splits around block-level content
//! and merges adjacent runs; section ranges decide where section breaks
//! go; a [`FlowBlockCache`] lets unchanged paragraphs skip conversion on
//! later passes.
//!
//! # Example
//!
//! ```
//! use docflow::convert::{
//!     ConversionInput, ConversionState, ConvertOptions, FlowConverter, PositionMap,
//! };
//! use docflow::model::{Document, DocumentNode, ParagraphAttrs};
//!
//! let document = Document::new(vec![DocumentNode::paragraph(
//!     ParagraphAttrs {
//!         stable_id: Some("intro".into()),
//!         ..Default::default()
//!     },
//!     vec![DocumentNode::text("Hello").with_id(2)],
//! )
//! .with_id(1)]);
//! let positions = PositionMap::from_nodes(&document.content);
//!
//! let converter = FlowConverter::new(ConvertOptions::default());
//! let mut state = ConversionState::with_cache();
//! let input = ConversionInput::new(&document).with_positions(&positions);
//!
//! let first = converter.convert(input, &mut state);
//! let second = converter.convert(input, &mut state);
//! assert_eq!(first.blocks, second.blocks);
//! assert_eq!(second.stats.cache_hits, 1);
//! ```

pub(crate) mod block;
mod cache;
mod context;
mod document;
pub(crate) mod inline;
mod merge;
mod options;
mod paragraph;
mod registry;
mod section;
mod tracked;
pub mod units;
mod visitor;

pub use cache::{CacheLookup, ContentKey, FlowBlockCache};
pub use context::{
    BookmarkTable, ConverterContext, DirectStyleResolver, NoPositions, PositionLookup,
    PositionMap, ResolvedParagraph, StyleResolver,
};
pub use document::{ConversionInput, ConversionState, FlowConverter, FlowEvent, FlowStream};
pub use merge::{can_merge, merge_runs};
pub use options::{ConvertOptions, Heuristics, HyperlinkConfig, TrackedChangesConfig};
pub use registry::{
    BlockConverter, BlockInput, ConverterEntry, ConverterRegistry, EligibilityCheck,
    InlineConverter, InlineInput, InlineOutcome,
};
pub use section::{analyze_section_ranges, requires_page_boundary, SectionTracker};
pub use tracked::filter_runs;
pub use visitor::{BlockIdGenerator, Inherited, Session};
