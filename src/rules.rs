// 🏷️ Quality Rules - cleaning + validation as plain functions
// Thresholds are fixed constants; every function is total over its input

use crate::item::RawItem;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Smallest accepted diameter (inclusive)
pub const MIN_DIAMETER_MM: f64 = 60.0;

/// Largest accepted diameter (inclusive)
pub const MAX_DIAMETER_MM: f64 = 90.0;

/// Blemish must stay strictly below this after cleaning
pub const MAX_BLEMISH_PERCENT: f64 = 5.0;

/// Fraction of blemish left on a dirty item once it is cleaned
pub const CLEANING_FACTOR: f64 = 0.10;

// ============================================================================
// CLEANING STAGE
// ============================================================================

/// Clean an item if it is flagged dirty
///
/// Dirty items come back with `blemish_percent * 0.10` and the flag cleared.
/// Clean items come back unchanged, so `clean(clean(x)) == clean(x)`.
pub fn clean(item: &RawItem) -> RawItem {
    if !item.is_dirty {
        return item.clone();
    }

    RawItem {
        blemish_percent: item.blemish_percent * CLEANING_FACTOR,
        is_dirty: false,
        ..item.clone()
    }
}

// ============================================================================
// VALIDATION RULES
// ============================================================================

/// Diameter within [60, 90] mm, bounds included
pub fn size_valid(item: &RawItem) -> bool {
    (MIN_DIAMETER_MM..=MAX_DIAMETER_MM).contains(&item.diameter_mm)
}

/// Blemish strictly below 5.0 percent
pub fn blemish_valid(item: &RawItem) -> bool {
    item.blemish_percent < MAX_BLEMISH_PERCENT
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_leaves_clean_item_unchanged() {
        let item = RawItem::new(1, 70.0, 12.0).with_weight(150);
        assert_eq!(clean(&item), item);
    }

    #[test]
    fn test_clean_dirty_item() {
        let item = RawItem::new(5, 80.0, 20.0).dirty().with_weight(140);
        let cleaned = clean(&item);

        assert!((cleaned.blemish_percent - 2.0).abs() < 1e-9);
        assert!(!cleaned.is_dirty);
        assert_eq!(cleaned.id, 5);
        assert_eq!(cleaned.diameter_mm, 80.0);
        assert_eq!(cleaned.weight_grams, 140);

        // Input is untouched
        assert!(item.is_dirty);
        assert_eq!(item.blemish_percent, 20.0);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = vec![
            RawItem::new(1, 70.0, 2.0),
            RawItem::new(2, 75.0, 60.0).dirty(),
            RawItem::new(3, -4.0, -10.0).dirty(),
            RawItem::new(4, 0.0, 0.0).dirty(),
        ];

        for item in samples {
            let once = clean(&item);
            assert_eq!(clean(&once), once);
        }
    }

    #[test]
    fn test_clean_accepts_out_of_range_values() {
        let cleaned = clean(&RawItem::new(9, -1.0, -50.0).dirty());
        assert!((cleaned.blemish_percent + 5.0).abs() < 1e-9);
        assert_eq!(cleaned.diameter_mm, -1.0);
    }

    #[test]
    fn test_size_bounds_inclusive() {
        assert!(size_valid(&RawItem::new(1, 60.0, 0.0)));
        assert!(size_valid(&RawItem::new(1, 90.0, 0.0)));
        assert!(size_valid(&RawItem::new(1, 75.0, 0.0)));

        assert!(!size_valid(&RawItem::new(1, 59.999, 0.0)));
        assert!(!size_valid(&RawItem::new(1, 90.0001, 0.0)));
        assert!(!size_valid(&RawItem::new(1, f64::NAN, 0.0)));
    }

    #[test]
    fn test_blemish_strict() {
        assert!(blemish_valid(&RawItem::new(1, 70.0, 4.999)));
        assert!(blemish_valid(&RawItem::new(1, 70.0, -3.0)));

        assert!(!blemish_valid(&RawItem::new(1, 70.0, 5.0)));
        assert!(!blemish_valid(&RawItem::new(1, 70.0, 5.1)));
    }
}
