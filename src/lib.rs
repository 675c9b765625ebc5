// Fruit Grader - Core Library
// Exposes the grading pipeline for the CLI and for tests

pub mod item;       // Data model - RawItem, Verdict, Batch
pub mod rules;      // Cleaning stage + validation rules
pub mod classifier; // Classifier + batch runner
pub mod parser;     // Delimited text → RawItem with fallbacks
pub mod registry;   // Sequential batch numbering
pub mod presenter;  // Terminal rendering

// Re-export commonly used types
pub use item::{Batch, RawItem, Reason, Verdict};
pub use rules::{
    blemish_valid, clean, size_valid,
    CLEANING_FACTOR, MAX_BLEMISH_PERCENT, MAX_DIAMETER_MM, MIN_DIAMETER_MM,
};
pub use classifier::{classify, classify_all, grade, run_batch, BatchReport, BatchSummary};
pub use parser::{
    parse_batch_count, parse_batch_line, parse_dirty_flag, parse_item,
    DelimitedParser, ParseWarning, ParsedBatchLine, ParsedItem, RecordParser,
};
pub use registry::{BatchRegistry, FIRST_BATCH_NUMBER};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
