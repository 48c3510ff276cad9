//! Observers notified of every emitted flow block.
//!
//! # Example
//!
//! ```
//! use docflow::model::{BlockKind, FlowBlock};
//! use docflow::render::BlockObserver;
//!
//! #[derive(Default)]
//! struct TableCounter(usize);
//!
//! impl BlockObserver for TableCounter {
//!     fn record(&mut self, kind: BlockKind, _block: &FlowBlock) {
//!         if kind == BlockKind::Table {
//!             self.0 += 1;
//!         }
//!     }
//! }
//! ```

use crate::model::{BlockKind, FlowBlock};

/// Receives each top-level flow block as it is emitted, in order.
pub trait BlockObserver {
    /// Called once per emitted block.
    fn record(&mut self, kind: BlockKind, block: &FlowBlock);

    /// Called before the first block of a pass.
    fn on_document_start(&mut self) {}

    /// Called after the last block of a pass.
    fn on_document_end(&mut self) {}
}

impl<O: BlockObserver + ?Sized> BlockObserver for &mut O {
    fn record(&mut self, kind: BlockKind, block: &FlowBlock) {
        (**self).record(kind, block);
    }

    fn on_document_start(&mut self) {
        (**self).on_document_start();
    }

    fn on_document_end(&mut self) {
        (**self).on_document_end();
    }
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BlockObserver for NoopObserver {
    fn record(&mut self, _kind: BlockKind, _block: &FlowBlock) {}
}

/// Observer remembering the kind and id of every block.
#[derive(Debug, Clone, Default)]
pub struct KindRecorder {
    records: Vec<(BlockKind, String)>,
}

impl KindRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded kinds in emission order.
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.records.iter().map(|(kind, _)| *kind).collect()
    }

    /// Recorded ids in emission order.
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|(_, id)| id.as_str()).collect()
    }

    /// Number of recorded blocks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl BlockObserver for KindRecorder {
    fn record(&mut self, kind: BlockKind, block: &FlowBlock) {
        self.records.push((kind, block.id().to_string()));
    }
}

/// Observer that forwards to several observers in order.
#[derive(Default)]
pub struct CompositeObserver<'a> {
    observers: Vec<Box<dyn BlockObserver + 'a>>,
}

impl<'a> CompositeObserver<'a> {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Add an observer to the chain.
    pub fn with_observer<O: BlockObserver + 'a>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Number of chained observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observer is chained.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl BlockObserver for CompositeObserver<'_> {
    fn record(&mut self, kind: BlockKind, block: &FlowBlock) {
        for observer in &mut self.observers {
            observer.record(kind, block);
        }
    }

    fn on_document_start(&mut self) {
        for observer in &mut self.observers {
            observer.on_document_start();
        }
    }

    fn on_document_end(&mut self) {
        for observer in &mut self.observers {
            observer.on_document_end();
        }
    }
}
