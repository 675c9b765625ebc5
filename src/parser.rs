// 🏗️ Record Parser - delimited text → RawItem
// Boundary layer: malformed input falls back to defaults and keeps going
//
// Line format:  id;diameterMM;blemishPercent;dirtyFlag;weightGrams | id;... | ...

use crate::item::RawItem;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// FALLBACK POLICY
// ============================================================================

/// Sentinel id for a missing or malformed id
pub const FALLBACK_ID: i64 = -1;

/// Used for missing or malformed diameter and blemish values
pub const FALLBACK_MEASUREMENT: f64 = 0.0;

/// Used for missing or malformed weight
pub const FALLBACK_WEIGHT: i64 = 0;

/// Used for a missing or malformed batch count
pub const FALLBACK_BATCH_COUNT: u32 = 0;

pub const ITEM_SEPARATOR: char = '|';
pub const FIELD_DELIMITER: u8 = b';';

const FIELD_COUNT: usize = 5;

// ============================================================================
// PARSE OUTPUT
// ============================================================================

/// A field that could not be read and was replaced by its fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub segment: Option<usize>, // 1-based item position, None for the batch count
    pub field: String,
    pub raw: String,
    pub fallback: String,
}

impl ParseWarning {
    fn new(segment: usize, field: &str, raw: &str, fallback: impl ToString) -> Self {
        ParseWarning {
            segment: Some(segment),
            field: field.to_string(),
            raw: raw.to_string(),
            fallback: fallback.to_string(),
        }
    }

    fn batch_count(raw: &str) -> Self {
        ParseWarning {
            segment: None,
            field: "batch count".to_string(),
            raw: raw.to_string(),
            fallback: FALLBACK_BATCH_COUNT.to_string(),
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(segment) = self.segment {
            write!(f, "item {}: ", segment)?;
        }

        if self.raw.is_empty() {
            write!(f, "{} missing, using {}", self.field, self.fallback)
        } else {
            write!(f, "invalid {} '{}', using {}", self.field, self.raw, self.fallback)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    pub item: RawItem,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedBatchLine {
    pub items: Vec<RawItem>,
    pub warnings: Vec<ParseWarning>,
}

// ============================================================================
// PARSER TRAIT
// ============================================================================

/// RecordParser - turns one line of raw input into the items of one batch
///
/// Implementations never fail: bad fields become fallbacks plus warnings.
pub trait RecordParser {
    fn parse_line(&self, line: &str) -> ParsedBatchLine;

    /// Parser name (for logs)
    fn name(&self) -> &str {
        "record"
    }
}

/// Semicolon-delimited fields, pipe-separated items
pub struct DelimitedParser;

impl DelimitedParser {
    pub fn new() -> Self {
        DelimitedParser
    }
}

impl Default for DelimitedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser for DelimitedParser {
    fn parse_line(&self, line: &str) -> ParsedBatchLine {
        parse_batch_line(line)
    }

    fn name(&self) -> &str {
        "delimited"
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse a full batch line
///
/// Items are split on `|`, trimmed, and empty segments are skipped.
/// One line is one batch: text after an embedded newline inside an item is
/// ignored with an `extra lines` warning.
pub fn parse_batch_line(line: &str) -> ParsedBatchLine {
    let mut parsed = ParsedBatchLine::default();

    let segments = line
        .split(ITEM_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    for (index, segment) in segments.enumerate() {
        let ParsedItem { item, warnings } = parse_item_at(segment, index + 1);
        parsed.items.push(item);
        parsed.warnings.extend(warnings);
    }

    parsed
}

/// Parse a single `id;diameter;blemish;dirty;weight` segment
///
/// Only the first line of the segment is read; any further lines are
/// reported as an `extra lines` warning.
pub fn parse_item(segment: &str) -> ParsedItem {
    parse_item_at(segment, 1)
}

fn parse_item_at(segment: &str, position: usize) -> ParsedItem {
    let mut warnings = Vec::new();
    let (fields, extra_lines) = split_fields(segment);

    if !extra_lines.is_empty() {
        warnings.push(ParseWarning::new(
            position,
            "extra lines",
            &extra_lines.join(" / "),
            "ignored",
        ));
    }

    if fields.len() > FIELD_COUNT {
        warnings.push(ParseWarning::new(
            position,
            "extra fields",
            &fields[FIELD_COUNT..].join(";"),
            "ignored",
        ));
    }

    let field = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

    let id = parse_or(field(0), "id", FALLBACK_ID, position, &mut warnings);
    let diameter_mm = parse_or(
        field(1),
        "diameter",
        FALLBACK_MEASUREMENT,
        position,
        &mut warnings,
    );
    let blemish_percent = parse_or(
        field(2),
        "blemish",
        FALLBACK_MEASUREMENT,
        position,
        &mut warnings,
    );
    let is_dirty = parse_dirty_flag(field(3));
    let weight_grams = parse_or(field(4), "weight", FALLBACK_WEIGHT, position, &mut warnings);

    for w in &warnings {
        debug!(segment = segment, "{}", w);
    }

    ParsedItem {
        item: RawItem {
            id,
            diameter_mm,
            blemish_percent,
            is_dirty,
            weight_grams,
        },
        warnings,
    }
}

/// `s` in any case means dirty, everything else means clean
pub fn parse_dirty_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("s")
}

/// Parse the number of batches to register
///
/// Anything that is not a whole number in `0..=u32::MAX` falls back to 0.
pub fn parse_batch_count(raw: &str) -> (u32, Option<ParseWarning>) {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(count) => (count, None),
        Err(_) => {
            let warning = ParseWarning::batch_count(trimmed);
            debug!("{}", warning);
            (FALLBACK_BATCH_COUNT, Some(warning))
        }
    }
}

/// Fields of the first record, plus the raw text of any records after it
fn split_fields(segment: &str) -> (Vec<String>, Vec<String>) {
    use csv::{ReaderBuilder, Trim};

    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(segment.as_bytes());

    let mut records = reader.records();
    let fields = match records.next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        // Unreadable record: every field falls back
        _ => Vec::new(),
    };

    let extra_lines = records
        .filter_map(|r| r.ok())
        .map(|record| record.iter().collect::<Vec<_>>().join(";"))
        .filter(|line| !line.is_empty())
        .collect();

    (fields, extra_lines)
}

fn parse_or<T>(
    raw: &str,
    field: &str,
    fallback: T,
    position: usize,
    warnings: &mut Vec<ParseWarning>,
) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warnings.push(ParseWarning::new(position, field, raw, fallback));
            fallback
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_complete() {
        let parsed = parse_item("1;70;2;n;150");

        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.item, RawItem::new(1, 70.0, 2.0).with_weight(150));
    }

    #[test]
    fn test_parse_item_trims_fields() {
        let parsed = parse_item(" 3 ; 75.5 ; 20 ; s ; 160 ");

        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.item.id, 3);
        assert_eq!(parsed.item.diameter_mm, 75.5);
        assert!(parsed.item.is_dirty);
    }

    #[test]
    fn test_dirty_flag_case_insensitive() {
        assert!(parse_dirty_flag("s"));
        assert!(parse_dirty_flag("S"));
        assert!(parse_dirty_flag(" s "));
        assert!(!parse_dirty_flag("n"));
        assert!(!parse_dirty_flag("sim"));
        assert!(!parse_dirty_flag(""));
        assert!(!parse_dirty_flag("true"));
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let parsed = parse_item("abc;big;x;s;heavy");

        assert_eq!(parsed.item.id, FALLBACK_ID);
        assert_eq!(parsed.item.diameter_mm, FALLBACK_MEASUREMENT);
        assert_eq!(parsed.item.blemish_percent, FALLBACK_MEASUREMENT);
        assert!(parsed.item.is_dirty);
        assert_eq!(parsed.item.weight_grams, FALLBACK_WEIGHT);

        let fields: Vec<&str> = parsed.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["id", "diameter", "blemish", "weight"]);
        assert_eq!(
            parsed.warnings[0].to_string(),
            "item 1: invalid id 'abc', using -1"
        );
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let parsed = parse_item("8;72");

        assert_eq!(parsed.item.id, 8);
        assert_eq!(parsed.item.diameter_mm, 72.0);
        assert_eq!(parsed.item.blemish_percent, 0.0);
        assert!(!parsed.item.is_dirty);
        assert_eq!(parsed.item.weight_grams, 0);
        assert_eq!(parsed.warnings.len(), 2);
        assert_eq!(
            parsed.warnings[0].to_string(),
            "item 1: blemish missing, using 0"
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let parsed = parse_item("1;70;2;n;150;extra;more");

        assert_eq!(parsed.item.weight_grams, 150);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].raw, "extra;more");
    }

    #[test]
    fn test_quotes_are_literal() {
        let parsed = parse_item("\"1\";70;2;n;150");
        assert_eq!(parsed.item.id, FALLBACK_ID);
        assert_eq!(parsed.item.diameter_mm, 70.0);
    }

    #[test]
    fn test_parse_batch_line() {
        let parsed = parse_batch_line("1;70;2;n;150 |  2;100;1;n;120| 3;75;20;s;130");

        let ids: Vec<i64> = parsed.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_parse_batch_line_skips_empty_segments() {
        let parsed = parse_batch_line("| 1;70;2;n;150 || |2;80;1;n;100|");
        assert_eq!(parsed.items.len(), 2);

        assert!(parse_batch_line("").items.is_empty());
        assert!(parse_batch_line("  |  | ").items.is_empty());
    }

    #[test]
    fn test_warning_positions_follow_kept_segments() {
        let parsed = parse_batch_line("1;70;2;n;150 || x;70;2;n;150");

        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].segment, Some(2));
    }

    #[test]
    fn test_parse_batch_count() {
        assert_eq!(parse_batch_count(" 3 "), (3, None));
        assert_eq!(parse_batch_count("0"), (0, None));

        let (count, warning) = parse_batch_count("three");
        assert_eq!(count, FALLBACK_BATCH_COUNT);
        assert_eq!(warning.unwrap().field, "batch count");

        let (count, warning) = parse_batch_count("-2");
        assert_eq!(count, 0);
        assert!(warning.is_some());
    }

    #[test]
    fn test_batch_count_above_u32_falls_back() {
        assert_eq!(parse_batch_count("4294967295"), (u32::MAX, None));

        let (count, warning) = parse_batch_count("10000000000");
        assert_eq!(count, 0);
        assert!(warning.is_some());
    }

    #[test]
    fn test_batch_count_warning_has_no_item_prefix() {
        let (_, warning) = parse_batch_count("lots");
        let warning = warning.unwrap();

        assert_eq!(warning.segment, None);
        assert_eq!(warning.to_string(), "invalid batch count 'lots', using 0");

        let (_, missing) = parse_batch_count("   ");
        assert_eq!(missing.unwrap().to_string(), "batch count missing, using 0");
    }

    #[test]
    fn test_embedded_newline_reported() {
        let parsed = parse_item("1;70;2;n;150\n2;80;1;n;100");

        assert_eq!(parsed.item.id, 1);
        assert_eq!(parsed.item.weight_grams, 150);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].field, "extra lines");
        assert_eq!(parsed.warnings[0].raw, "2;80;1;n;100");

        let line = parse_batch_line("1;70;2;n;150 | 3;75;20;s;160\n4;75;60;s;155");
        assert_eq!(line.items.len(), 2);
        assert_eq!(line.warnings[0].segment, Some(2));
        assert_eq!(
            line.warnings[0].to_string(),
            "item 2: invalid extra lines '4;75;60;s;155', using ignored"
        );
    }

    #[test]
    fn test_delimited_parser_trait() {
        let parser: Box<dyn RecordParser> = Box::new(DelimitedParser::new());
        assert_eq!(parser.name(), "delimited");
        assert_eq!(parser.parse_line("4;75;60;s;140").items[0].id, 4);
    }
}
