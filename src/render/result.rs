//! Conversion result with statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::observer::BlockObserver;
use crate::model::{BlockKind, FlowBlock};

/// Flow blocks of a document together with conversion statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Flow blocks in document order
    pub blocks: Vec<FlowBlock>,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl ConversionResult {
    /// Create a new result.
    pub fn new(blocks: Vec<FlowBlock>, stats: ConversionStats) -> Self {
        Self { blocks, stats }
    }

    /// Number of top-level blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if no block was produced.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Paragraph blocks only.
    pub fn paragraphs(&self) -> impl Iterator<Item = &crate::model::ParagraphBlock> {
        self.blocks.iter().filter_map(FlowBlock::as_paragraph)
    }
}

/// Statistics collected during conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Top-level blocks per kind
    pub blocks_by_kind: BTreeMap<String, u32>,

    /// Runs in top-level paragraph blocks
    pub run_count: u32,

    /// Body paragraphs seen
    pub paragraph_count: u32,

    /// Body paragraphs that produced no block
    pub dropped_paragraph_count: u32,

    /// Paragraphs answered from the cache
    pub cache_hits: u32,

    /// Paragraphs converted and stored in the cache
    pub cache_misses: u32,

    /// Approximate word count of paragraph text
    pub word_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of top-level blocks of `kind`.
    pub fn count(&self, kind: BlockKind) -> u32 {
        self.blocks_by_kind.get(kind.as_str()).copied().unwrap_or(0)
    }

    /// Total number of top-level blocks.
    pub fn total_blocks(&self) -> u32 {
        self.blocks_by_kind.values().sum()
    }

    /// Count a body paragraph and whether it produced anything.
    pub fn add_paragraph(&mut self, produced: bool) {
        self.paragraph_count += 1;
        if !produced {
            self.dropped_paragraph_count += 1;
        }
    }

    /// Count a cache hit.
    pub fn add_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    /// Count a cache miss.
    pub fn add_cache_miss(&mut self) {
        self.cache_misses += 1;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        for (kind, count) in &other.blocks_by_kind {
            *self.blocks_by_kind.entry(kind.clone()).or_default() += count;
        }
        self.run_count += other.run_count;
        self.paragraph_count += other.paragraph_count;
        self.dropped_paragraph_count += other.dropped_paragraph_count;
        self.cache_hits += other.cache_hits;
        self.cache_misses += other.cache_misses;
        self.word_count += other.word_count;
    }
}

impl BlockObserver for ConversionStats {
    fn record(&mut self, kind: BlockKind, block: &FlowBlock) {
        *self.blocks_by_kind.entry(kind.as_str().to_string()).or_default() += 1;
        if let Some(paragraph) = block.as_paragraph() {
            self.run_count += paragraph.runs.len() as u32;
            let words: usize = paragraph
                .runs
                .iter()
                .map(|run| run.plain_text().split_whitespace().count())
                .sum();
            self.word_count += words as u32;
        }
    }
}
