//! Flow block cache.
//!
//! Converted paragraphs are cached under their stable id together with a
//! digest of their content and the paragraph start they were converted at.
//! When the same content is seen again at another position the cached
//! blocks are translated by the position difference instead of being
//! converted again. Entries are only valid for the styling context they
//! were converted under; a pass with a different context starts empty.

use std::collections::HashMap;

use log::{debug, trace, warn};
use md5::{Digest, Md5};

use super::context::{BookmarkTable, ConverterContext};
use crate::model::{DocumentNode, FlowBlock, SdtMetadata};

/// Serialised paragraph content and its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentKey {
    serialized: String,
    hash: String,
}

impl ContentKey {
    /// Key for a paragraph converted under the given ambient structured
    /// content.
    pub fn new(node: &DocumentNode, sdt: Option<&SdtMetadata>) -> serde_json::Result<Self> {
        let serialized = serde_json::to_string(&(node, sdt))?;
        let hash = format!("{:x}", Md5::digest(serialized.as_bytes()));
        Ok(Self { serialized, hash })
    }

    /// Hex digest of the content.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Serialised content.
    pub fn serialized(&self) -> &str {
        &self.serialized
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    content_hash: String,
    anchor_start: u32,
    blocks: Vec<FlowBlock>,
    bookmarks: Vec<(String, u32)>,
    generation: u64,
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    /// Cached blocks, already translated to the current position.
    Hit(Vec<FlowBlock>),
    /// Nothing usable cached; store the conversion under this key.
    Miss(ContentKey),
    /// The paragraph cannot be cached.
    Uncacheable,
}

/// Cache of converted paragraphs keyed by stable id.
///
/// Owned by the caller and reused across conversion passes. Entries depend
/// on the conversion options, so the cache must be cleared when they change.
#[derive(Debug, Clone, Default)]
pub struct FlowBlockCache {
    entries: HashMap<String, CacheEntry>,
    context_hash: Option<String>,
    generation: u64,
    hits: u64,
    misses: u64,
}

impl FlowBlockCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a paragraph converted at paragraph start `current_start`.
    ///
    /// On a hit every position in the cached blocks is shifted by the
    /// distance between `current_start` and the start they were converted
    /// at, the entry is re-anchored, and the bookmarks the paragraph
    /// registers are replayed into `bookmarks`.
    pub fn lookup(
        &mut self,
        stable_id: &str,
        node: &DocumentNode,
        sdt: Option<&SdtMetadata>,
        current_start: u32,
        bookmarks: &mut BookmarkTable,
    ) -> CacheLookup {
        let key = match ContentKey::new(node, sdt) {
            Ok(key) => key,
            Err(err) => {
                warn!("cannot serialise paragraph {stable_id} for caching: {err}");
                return CacheLookup::Uncacheable;
            }
        };

        let generation = self.generation;
        let Some(entry) = self
            .entries
            .get_mut(stable_id)
            .filter(|entry| entry.content_hash == key.hash)
        else {
            debug!("flow block cache miss for {stable_id}");
            self.misses += 1;
            return CacheLookup::Miss(key);
        };

        let delta = i64::from(current_start) - i64::from(entry.anchor_start);
        if delta != 0 {
            for block in &mut entry.blocks {
                block.shift_positions(delta);
            }
            for (_, start) in &mut entry.bookmarks {
                *start = shift(*start, delta);
            }
            entry.anchor_start = current_start;
        }
        entry.generation = generation;
        for (name, start) in &entry.bookmarks {
            bookmarks.register(name.clone(), *start);
        }

        trace!("flow block cache hit for {stable_id} (shift {delta})");
        self.hits += 1;
        CacheLookup::Hit(entry.blocks.clone())
    }

    /// Store a conversion, replacing any previous entry for the id.
    pub fn store(
        &mut self,
        stable_id: impl Into<String>,
        key: ContentKey,
        anchor_start: u32,
        blocks: Vec<FlowBlock>,
        bookmarks: Vec<(String, u32)>,
    ) {
        self.entries.insert(
            stable_id.into(),
            CacheEntry {
                content_hash: key.hash,
                anchor_start,
                blocks,
                bookmarks,
                generation: self.generation,
            },
        );
    }

    /// Start a conversion pass under the document's styling context.
    ///
    /// A context that differs from the previous pass drops every entry.
    pub fn begin_pass(&mut self, context: &ConverterContext) {
        self.generation += 1;
        let hash = match serde_json::to_string(context) {
            Ok(serialized) => Some(format!("{:x}", Md5::digest(serialized.as_bytes()))),
            Err(err) => {
                warn!("cannot serialise converter context for caching: {err}");
                None
            }
        };
        if hash.is_none() || hash != self.context_hash {
            if !self.entries.is_empty() {
                debug!("converter context changed, dropping {} cached paragraphs", self.entries.len());
            }
            self.entries.clear();
        }
        self.context_hash = hash;
    }

    /// Finish a pass, evicting entries not used during it.
    pub fn end_pass(&mut self) {
        let generation = self.generation;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.generation == generation);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!("evicted {evicted} stale flow block cache entries");
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.context_hash = None;
    }

    /// Check whether an id is cached.
    pub fn contains(&self, stable_id: &str) -> bool {
        self.entries.contains_key(stable_id)
    }

    /// Number of cached paragraphs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that required conversion.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

fn shift(value: u32, delta: i64) -> u32 {
    (i64::from(value) + delta).clamp(0, i64::from(u32::MAX)) as u32
}
