// ✅ Classifier + Batch Runner
// clean → validate size → validate blemish → verdict, applied in order over a batch

use crate::item::{Batch, RawItem, Reason, Verdict};
use crate::rules::{blemish_valid, clean, size_valid};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Decide the reason for one item (first matching rule wins)
pub fn grade(item: &RawItem) -> Reason {
    let cleaned = clean(item);

    let size_ok = size_valid(&cleaned);
    let blemish_ok = blemish_valid(&cleaned);

    if !size_ok {
        Reason::SizeOutOfRange
    } else if !blemish_ok {
        Reason::ExcessiveBlemish
    } else {
        Reason::Approved
    }
}

/// Classify one item into a verdict carrying the original item's id
pub fn classify(item: &RawItem) -> Verdict {
    let reason = grade(item);
    debug!(id = item.id, reason = reason.message(), "classified item");
    Verdict::new(item.id, reason)
}

/// Classify a slice of items, one verdict per item in input order
pub fn classify_all(items: &[RawItem]) -> Vec<Verdict> {
    items.iter().map(classify).collect()
}

// ============================================================================
// BATCH RUNNER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_number: u32,
    pub verdicts: Vec<Verdict>,
}

impl BatchReport {
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_verdicts(&self.verdicts)
    }
}

/// Run the classifier over every item of a batch
///
/// No dedup, no sorting, no filtering: N items in, N verdicts out, same order.
pub fn run_batch(batch: &Batch) -> BatchReport {
    let verdicts = classify_all(&batch.items);
    debug!(
        batch = batch.batch_number,
        items = verdicts.len(),
        "batch classified"
    );

    BatchReport {
        batch_number: batch.batch_number,
        verdicts,
    }
}

// ============================================================================
// BATCH SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub approved: usize,
    pub rejected_size: usize,
    pub rejected_blemish: usize,
}

impl BatchSummary {
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let count = |reason: Reason| {
            verdicts
                .iter()
                .filter(|v| v.reason == reason.message())
                .count()
        };

        BatchSummary {
            total: verdicts.len(),
            approved: count(Reason::Approved),
            rejected_size: count(Reason::SizeOutOfRange),
            rejected_blemish: count(Reason::ExcessiveBlemish),
        }
    }

    pub fn rejected(&self) -> usize {
        self.rejected_size + self.rejected_blemish
    }

    /// Share of approved items, 0.0 for an empty batch
    pub fn approval_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.approved as f64 / self.total as f64
    }

    pub fn summary(&self) -> String {
        format!(
            "{} items: {} approved, {} rejected ({} size, {} blemish) | {:.1}% approval",
            self.total,
            self.approved,
            self.rejected(),
            self.rejected_size,
            self.rejected_blemish,
            self.approval_rate() * 100.0
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
