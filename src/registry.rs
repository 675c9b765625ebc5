// 🗂️ Batch Registry - sequential batch numbering
// The only mutable state in the pipeline: which batches were registered, in what order

use crate::classifier::{run_batch, BatchReport};
use crate::item::{Batch, RawItem};
use tracing::info;

/// Number given to the first registered batch
pub const FIRST_BATCH_NUMBER: u32 = 101;

pub struct BatchRegistry {
    batches: Vec<Batch>,
    next_number: u32,
}

impl BatchRegistry {
    pub fn new() -> Self {
        BatchRegistry {
            batches: Vec::new(),
            next_number: FIRST_BATCH_NUMBER,
        }
    }

    /// Register a batch under the next number
    ///
    /// Empty batches still consume a number. Numbering stops at `u32::MAX`.
    pub fn register(&mut self, items: Vec<RawItem>) -> &Batch {
        let batch = Batch::new(self.next_number, items);
        self.next_number = self.next_number.saturating_add(1);
        self.batches.push(batch);
        &self.batches[self.batches.len() - 1]
    }

    /// Consume `count` numbers without storing any batch
    ///
    /// Used for batches that were announced but never read.
    pub fn skip_numbers(&mut self, count: u32) {
        self.next_number = self.next_number.saturating_add(count);
    }

    /// Number the next registered batch will get
    pub fn next_number(&self) -> u32 {
        self.next_number
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Run every registered batch in registration order
    pub fn run_all(&self) -> Vec<BatchReport> {
        info!(batches = self.batches.len(), "running registered batches");
        self.batches.iter().map(run_batch).collect()
    }
}

impl Default for BatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
