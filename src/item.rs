// 🍎 Item Model - raw measurements in, verdicts out
// Flat value types shared by the parser, the rules and the batch runner

use serde::{Deserialize, Serialize};

// ============================================================================
// RAW ITEM
// ============================================================================

/// RawItem - one physical unit as measured, before cleaning
///
/// Never mutated in place: cleaning builds a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub id: i64,                // Not unique-enforced, duplicates are processed independently
    pub diameter_mm: f64,       // Millimeters
    pub blemish_percent: f64,   // Surface defect percentage, range not pre-validated
    pub is_dirty: bool,         // Flagged for cleaning
    pub weight_grams: i64,      // Informational only
}

impl RawItem {
    /// Create a clean item with zero weight
    pub fn new(id: i64, diameter_mm: f64, blemish_percent: f64) -> Self {
        RawItem {
            id,
            diameter_mm,
            blemish_percent,
            is_dirty: false,
            weight_grams: 0,
        }
    }

    /// Builder pattern: flag the item as dirty
    pub fn dirty(self) -> Self {
        RawItem {
            is_dirty: true,
            ..self
        }
    }

    /// Builder pattern: set the measured weight
    pub fn with_weight(self, weight_grams: i64) -> Self {
        RawItem {
            weight_grams,
            ..self
        }
    }
}

// ============================================================================
// REASON
// ============================================================================

/// Why an item was approved or rejected
///
/// The verdict's `approved` flag is derived from this, so the two can't disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    Approved,
    SizeOutOfRange,
    ExcessiveBlemish,
}

impl Reason {
    /// Human-readable reason line
    pub fn message(&self) -> &'static str {
        match self {
            Reason::Approved => "Approved",
            Reason::SizeOutOfRange => "Rejected: size out of range.",
            Reason::ExcessiveBlemish => "Rejected: excessive blemish after cleaning.",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Reason::Approved)
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// Verdict - classification outcome for one RawItem
///
/// Correlates back to its item by `id` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub id: i64,
    pub approved: bool,
    pub reason: String,
}

impl Verdict {
    pub fn new(id: i64, reason: Reason) -> Self {
        Verdict {
            id,
            approved: reason.is_approved(),
            reason: reason.message().to_string(),
        }
    }

    /// Status label for display
    pub fn status_label(&self) -> &'static str {
        if self.approved {
            "APPROVED"
        } else {
            "REJECTED"
        }
    }
}

// ============================================================================
// BATCH
// ============================================================================

/// Batch - a numbered, ordered group of items registered together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub batch_number: u32,
    pub items: Vec<RawItem>,
}

impl Batch {
    pub fn new(batch_number: u32, items: Vec<RawItem>) -> Self {
        Batch {
            batch_number,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
