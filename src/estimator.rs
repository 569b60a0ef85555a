// Price-range synthesis over a filtered candidate set
// Deterministic descriptive aggregation only: screen out unpriced records,
// sort newest first, derive PSF and a fixed banding below each observed
// price, then narrow to the queried floor band.

use crate::floors::FloorBand;
use crate::record::ResaleRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Square feet per square meter.
pub const SQM_PER_SQFT: f64 = 10.7639;

/// Width of the reported price band below each observed price, in SGD.
/// Hard-coded business rule carried over unchanged.
pub const PRICE_BAND_SGD: f64 = 30_000.0;

/// How many recent transactions a summary reports at most.
pub const RECENT_TRANSACTION_LIMIT: usize = 3;

// ============================================================================
// PRICED CANDIDATE
// ============================================================================

/// A candidate that survived the price screen, with its derived values.
#[derive(Debug, Clone)]
pub struct PricedCandidate {
    pub month: Option<NaiveDate>,
    pub storey_range: Option<String>,
    pub resale_price: f64,
    pub floor_group: FloorBand,
    /// Price per square foot. `None` when the floor area is missing or
    /// zero; such candidates stay eligible for range/recent reporting but
    /// are excluded from the PSF average.
    pub psf: Option<f64>,
    pub price_range_text: String,
}

impl PricedCandidate {
    fn from_record(record: &ResaleRecord, resale_price: f64) -> PricedCandidate {
        PricedCandidate {
            month: record.month,
            storey_range: record.storey_range.clone(),
            resale_price,
            floor_group: record
                .storey_range
                .as_deref()
                .map(FloorBand::from_storey_range)
                .unwrap_or(FloorBand::Unknown),
            psf: compute_psf(resale_price, record.floor_area_sqm),
            price_range_text: price_range_text(resale_price),
        }
    }

    fn display_date(&self) -> String {
        self.month
            .map(|d| d.format("%d-%b-%Y").to_string())
            .unwrap_or_default()
    }
}

/// Screen and order candidates for estimation.
///
/// Records without a completed-sale price are dropped (they carry no
/// estimation value). The survivors are sorted by month descending with
/// unparsable months last; ties among those keep input order.
pub fn prepare_candidates(candidates: &[&ResaleRecord]) -> Vec<PricedCandidate> {
    let mut prepared: Vec<PricedCandidate> = candidates
        .iter()
        .filter_map(|&record| {
            record
                .resale_price
                .map(|price| PricedCandidate::from_record(record, price))
        })
        .collect();

    // Option<NaiveDate> orders None first, so the reverse comparison puts
    // missing months at the end.
    prepared.sort_by(|a, b| b.month.cmp(&a.month));
    prepared
}

// ============================================================================
// DERIVED VALUES
// ============================================================================

/// Price per square foot, converting the area from square meters.
/// Undefined for a missing or zero area.
pub fn compute_psf(resale_price: f64, floor_area_sqm: Option<f64>) -> Option<f64> {
    match floor_area_sqm {
        Some(area) if area > 0.0 => Some(resale_price / (area * SQM_PER_SQFT)),
        _ => None,
    }
}

/// Fixed banding below the observed price, floored at zero.
/// e.g. 450000 → "SGD 420,000 – 450,000".
pub fn price_range_text(resale_price: f64) -> String {
    let low = (resale_price - PRICE_BAND_SGD).max(0.0);
    format!(
        "SGD {} – {}",
        format_thousands(low as i64),
        format_thousands(resale_price as i64)
    )
}

/// Whole-unit price for display, e.g. "$450,000".
pub fn price_text(resale_price: f64) -> String {
    format!("${}", format_thousands(resale_price as i64))
}

/// Thousands-separated integer formatting, no decimals.
pub fn format_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

// ============================================================================
// FLOOR-BAND SUMMARY
// ============================================================================

/// One recent transaction, formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentTransaction {
    /// "DD-Mon-YYYY", empty when the month was unparsable.
    pub date: String,
    pub storey_range: String,
    /// "$N,NNN"
    pub price_text: String,
}

/// Aggregated estimate for one floor band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorBandSummary {
    /// Price band of the most recent matching transaction.
    pub price_range_text: String,
    /// Newest first, at most three.
    pub recent_transactions: Vec<RecentTransaction>,
    /// Mean PSF over the band-matched set, skipping candidates whose PSF
    /// is undefined. `None` when no candidate in the band had a usable
    /// floor area.
    pub average_psf: Option<f64>,
    /// Mean resale price over the full priced candidate set for the
    /// address, any floor band.
    pub average_street_price: f64,
}

/// Narrow the prepared candidates to the target band and aggregate.
///
/// Returns `None` when no candidate falls in the band - the caller reports
/// that distinctly from "no candidates at all". Expects `prepared` to come
/// from `prepare_candidates` (priced, sorted newest first).
pub fn summarize_for_band(
    prepared: &[PricedCandidate],
    target: FloorBand,
) -> Option<FloorBandSummary> {
    let band_matches: Vec<&PricedCandidate> = prepared
        .iter()
        .filter(|c| c.floor_group == target)
        .collect();

    let newest = band_matches.first()?;

    let recent_transactions = band_matches
        .iter()
        .take(RECENT_TRANSACTION_LIMIT)
        .map(|c| RecentTransaction {
            date: c.display_date(),
            storey_range: c.storey_range.clone().unwrap_or_default(),
            price_text: price_text(c.resale_price),
        })
        .collect();

    let defined_psf: Vec<f64> = band_matches.iter().filter_map(|c| c.psf).collect();
    let average_psf = if defined_psf.is_empty() {
        None
    } else {
        Some(defined_psf.iter().sum::<f64>() / defined_psf.len() as f64)
    };

    let average_street_price =
        prepared.iter().map(|c| c.resale_price).sum::<f64>() / prepared.len() as f64;

    Some(FloorBandSummary {
        price_range_text: newest.price_range_text.clone(),
        recent_transactions,
        average_psf,
        average_street_price,
    })
}

// ============================================================================
// TESTS
// ============================================================================
