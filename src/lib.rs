//! # docflow
//!
//! Converts rich-document trees into flat, pagination-ready flow blocks.
//!
//! A format translator supplies a [`Document`]: a tree of paragraphs,
//! runs, text, tabs, images, tables, fields and structured content, with
//! marks for formatting, links, comments and tracked changes. docflow
//! turns it into an ordered list of [`FlowBlock`]s (paragraphs made of
//! styled runs, images, drawings, tables and breaks) for a layout engine.
//!
//! ## Quick Start
//!
//! ```
//! use docflow::{convert_document, ConvertOptions, Document};
//!
//! let json = r#"{"content": [
//!     {"type": "paragraph", "children": [{"type": "text", "text": "Hello"}]}
//! ]}"#;
//! let document = Document::from_json(json)?;
//!
//! let result = convert_document(&document, &ConvertOptions::default());
//! assert_eq!(docflow::render::to_text(&result.blocks), "Hello");
//! # Ok::<(), docflow::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Paragraph assembly**: inline content to styled runs, split around
//!   block-level images, drawings and breaks
//! - **Tracked changes**: review, final and original views
//! - **Sections**: section breaks with page size, margins and columns
//! - **Incremental**: unchanged paragraphs are reused across passes,
//!   shifted to their new positions

pub mod convert;
pub mod error;
pub mod model;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use convert::{
    ConversionInput, ConversionState, ConvertOptions, ConverterRegistry, FlowBlockCache,
    FlowConverter, FlowEvent, PositionMap, TrackedChangesConfig,
};
pub use error::{Error, Result};
pub use model::{
    BlockKind, Document, DocumentNode, FlowBlock, Mark, NodeKind, ParagraphBlock, Run, RunStyle,
    TrackedChangesMode,
};
pub use render::{ConversionResult, ConversionStats, JsonFormat};

use std::path::Path;

/// Convert a document with the built-in converters.
///
/// Positions are derived from node ids with [`PositionMap::from_nodes`];
/// nodes without an id get no positions.
///
/// # Example
///
/// ```
/// use docflow::{convert_document, ConvertOptions, Document};
///
/// let result = convert_document(&Document::default(), &ConvertOptions::default());
/// assert!(result.is_empty());
/// ```
pub fn convert_document(document: &Document, options: &ConvertOptions) -> ConversionResult {
    let positions = PositionMap::from_nodes(&document.content);
    let converter = FlowConverter::new(options.clone());
    let mut state = ConversionState::new();
    converter.convert(
        ConversionInput::new(document).with_positions(&positions),
        &mut state,
    )
}

/// Parse a JSON document and convert it.
///
/// # Example
///
/// ```
/// use docflow::{convert_json, ConvertOptions};
///
/// let result = convert_json(r#"{"content": []}"#, &ConvertOptions::default())?;
/// assert_eq!(result.stats.total_blocks(), 0);
/// # Ok::<(), docflow::Error>(())
/// ```
pub fn convert_json(json: &str, options: &ConvertOptions) -> Result<ConversionResult> {
    let document = Document::from_json(json)?;
    Ok(convert_document(&document, options))
}

/// Read a JSON document from a file and convert it.
///
/// # Example
///
/// ```no_run
/// use docflow::{convert_file, ConvertOptions};
///
/// let result = convert_file("document.json", &ConvertOptions::default()).unwrap();
/// println!("{} blocks", result.len());
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<ConversionResult> {
    let json = std::fs::read_to_string(path)?;
    convert_json(&json, options)
}

/// Flow blocks of a document with default options.
pub fn to_flow_blocks(document: &Document) -> Vec<FlowBlock> {
    convert_document(document, &ConvertOptions::default()).blocks
}

/// Builder holding options and cross-pass state for repeated conversion
/// of an evolving document.
///
/// # Example
///
/// ```
/// use docflow::{Docflow, Document, TrackedChangesMode};
///
/// let mut docflow = Docflow::new()
///     .with_tracked_changes(TrackedChangesMode::Final)
///     .with_cache();
///
/// let first = docflow.convert(&Document::default());
/// let second = docflow.convert(&Document::default());
/// assert_eq!(first.blocks, second.blocks);
/// ```
#[derive(Debug, Default)]
pub struct Docflow {
    options: ConvertOptions,
    state: ConversionState,
}

impl Docflow {
    /// Create a new builder with default options and no cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self.invalidate();
        self
    }

    /// Filter tracked changes in the given mode.
    pub fn with_tracked_changes(mut self, mode: TrackedChangesMode) -> Self {
        self.options = self.options.with_tracked_changes(mode);
        self.invalidate();
        self
    }

    /// Keep converted paragraphs between passes.
    pub fn with_cache(mut self) -> Self {
        self.state.cache.get_or_insert_with(FlowBlockCache::new);
        self
    }

    /// Current options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Cross-pass state.
    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Convert a document, reusing cached paragraphs from earlier passes.
    pub fn convert(&mut self, document: &Document) -> ConversionResult {
        let positions = PositionMap::from_nodes(&document.content);
        let converter = FlowConverter::new(self.options.clone());
        converter.convert(
            ConversionInput::new(document).with_positions(&positions),
            &mut self.state,
        )
    }

    fn invalidate(&mut self) {
        if let Some(cache) = self.state.cache.as_mut() {
            cache.clear();
        }
        self.state.bookmarks.clear();
    }
}
