// Record normalization - raw CSV cells → typed resale records
// Normalization happens exactly once, at load time; records are
// immutable afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// RAW RECORD
// ============================================================================

/// One CSV row as read from the source file, before normalization.
/// Every field is text; coercion happens in `normalize()`.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub street_name: String,
    pub block: String,
    pub flat_type: String,
    pub storey_range: String,
    pub month: String,
    pub resale_price: String,
    pub floor_area_sqm: String,
}

impl RawRecord {
    /// Normalize into a typed record.
    ///
    /// Key text fields are upper-cased and trimmed. Returns `None` when any
    /// of the three key fields is empty after trimming - such rows carry no
    /// matchable address and are dropped from the working set. Malformed
    /// optional cells never fail the row; they become `None` and are
    /// absorbed downstream.
    pub fn normalize(&self) -> Option<ResaleRecord> {
        let street_name = self.street_name.trim().to_uppercase();
        let block = self.block.trim().to_uppercase();
        let flat_type = self.flat_type.trim().to_uppercase();

        if street_name.is_empty() || block.is_empty() || flat_type.is_empty() {
            return None;
        }

        let storey_range = match self.storey_range.trim() {
            "" => None,
            s => Some(s.to_string()),
        };

        Some(ResaleRecord {
            street_name,
            block,
            flat_type,
            storey_range,
            month: parse_month(&self.month),
            resale_price: parse_positive_amount(&self.resale_price),
            floor_area_sqm: parse_positive_amount(&self.floor_area_sqm),
        })
    }
}

// ============================================================================
// NORMALIZED RECORD
// ============================================================================

/// One historical resale transaction, normalized.
///
/// `street_name`, `block` and `flat_type` are never empty. The optional
/// fields keep malformed source cells as `None` (or raw text for
/// `storey_range`, classified as `Unknown` later) rather than failing
/// the load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResaleRecord {
    pub street_name: String,
    pub block: String,
    pub flat_type: String,

    /// Raw storey range text, e.g. "04 TO 06". Kept as-is even when
    /// malformed; floor-band classification handles it.
    pub storey_range: Option<String>,

    /// Transaction month (first of month). `None` when unparsable.
    pub month: Option<NaiveDate>,

    /// Completed-sale price in whole SGD. `None` excludes the record
    /// from estimation.
    pub resale_price: Option<f64>,

    pub floor_area_sqm: Option<f64>,
}

impl ResaleRecord {
    /// Transaction date formatted for display, e.g. "15-Jun-2023".
    pub fn display_date(&self) -> Option<String> {
        self.month.map(|d| d.format("%d-%b-%Y").to_string())
    }
}

// ============================================================================
// FIELD PARSERS
// ============================================================================

/// Parse a "YYYY-MM" month cell. Anything else yields `None`.
fn parse_month(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    // NaiveDate needs a day; anchor to the first of the month.
    NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d").ok()
}

/// Parse a numeric cell, rejecting negatives and non-numbers.
fn parse_positive_amount(cell: &str) -> Option<f64> {
    let value: f64 = cell.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_raw() -> RawRecord {
        RawRecord {
            street_name: "  ang mo kio ave 3 ".to_string(),
            block: " 123a ".to_string(),
            flat_type: "4 room".to_string(),
            storey_range: "04 TO 06".to_string(),
            month: "2023-06".to_string(),
            resale_price: "450000".to_string(),
            floor_area_sqm: "90".to_string(),
        }
    }

    #[test]
    fn test_normalize_uppercases_and_trims_keys() {
        let record = create_test_raw().normalize().unwrap();

        assert_eq!(record.street_name, "ANG MO KIO AVE 3");
        assert_eq!(record.block, "123A");
        assert_eq!(record.flat_type, "4 ROOM");
    }

    #[test]
    fn test_normalize_parses_typed_fields() {
        let record = create_test_raw().normalize().unwrap();

        assert_eq!(record.storey_range.as_deref(), Some("04 TO 06"));
        assert_eq!(record.month, NaiveDate::from_ymd_opt(2023, 6, 1));
        assert_eq!(record.resale_price, Some(450000.0));
        assert_eq!(record.floor_area_sqm, Some(90.0));
    }

    #[test]
    fn test_normalize_rejects_empty_key_fields() {
        let mut raw = create_test_raw();
        raw.street_name = "   ".to_string();
        assert!(raw.normalize().is_none());

        let mut raw = create_test_raw();
        raw.block = String::new();
        assert!(raw.normalize().is_none());

        let mut raw = create_test_raw();
        raw.flat_type = String::new();
        assert!(raw.normalize().is_none());
    }

    #[test]
    fn test_malformed_cells_become_none() {
        let mut raw = create_test_raw();
        raw.month = "June 2023".to_string();
        raw.resale_price = "n/a".to_string();
        raw.floor_area_sqm = String::new();
        raw.storey_range = "  ".to_string();

        let record = raw.normalize().unwrap();
        assert_eq!(record.month, None);
        assert_eq!(record.resale_price, None);
        assert_eq!(record.floor_area_sqm, None);
        assert_eq!(record.storey_range, None);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut raw = create_test_raw();
        raw.resale_price = "-5000".to_string();

        let record = raw.normalize().unwrap();
        assert_eq!(record.resale_price, None);
    }

    #[test]
    fn test_display_date_format() {
        let record = create_test_raw().normalize().unwrap();
        assert_eq!(record.display_date().as_deref(), Some("01-Jun-2023"));
    }
}
