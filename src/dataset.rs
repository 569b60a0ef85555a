// Dataset loading - gzip CSV → immutable in-memory snapshot
// The snapshot is loaded once at process start and treated as read-only
// for the process lifetime; every query borrows it.

use crate::record::{RawRecord, ResaleRecord};
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns the source file must carry (matched case-insensitively).
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "street_name",
    "block",
    "flat_type",
    "storey_range",
    "month",
    "resale_price",
    "floor_area_sqm",
];

// ============================================================================
// DATA ERROR
// ============================================================================

/// Structural problems with the source file. Fatal at load time - unlike
/// malformed cells, which are absorbed per-record downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// One or more required columns are absent from the header row.
    MissingColumns(Vec<String>),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::MissingColumns(columns) => {
                write!(f, "missing required columns: {}", columns.join(", "))
            }
        }
    }
}

impl std::error::Error for DataError {}

// ============================================================================
// DATASET
// ============================================================================

/// Immutable snapshot of the normalized transaction history.
///
/// Explicit handle passed into the engine; no module-level state. In a
/// server context it is shared read-only across requests with no locking.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ResaleRecord>,
}

impl Dataset {
    /// Load from a gzip-compressed CSV file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open data file: {:?}", path.as_ref()))?;
        Dataset::from_reader(GzDecoder::new(file))
    }

    /// Load from any uncompressed CSV stream. Seam for tests and for
    /// callers that decompress themselves.
    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read CSV header row")?;
        let column_index = resolve_columns(headers)?;

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row.context("Failed to read CSV row")?;

            let cell = |i: usize| row.get(column_index[i]).unwrap_or("").to_string();
            let raw = RawRecord {
                street_name: cell(0),
                block: cell(1),
                flat_type: cell(2),
                storey_range: cell(3),
                month: cell(4),
                resale_price: cell(5),
                floor_area_sqm: cell(6),
            };

            // Rows without a usable address are dropped here, keeping the
            // non-empty key invariant for the working set.
            if let Some(record) = raw.normalize() {
                records.push(record);
            }
        }

        Ok(Dataset { records })
    }

    /// Build directly from normalized records (test fixtures).
    pub fn from_records(records: Vec<ResaleRecord>) -> Dataset {
        Dataset { records }
    }

    pub fn records(&self) -> &[ResaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ========================================================================
    // OPTION ENUMERATION (drives the UI selection cascade)
    // ========================================================================

    /// Distinct street names, sorted.
    pub fn streets(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| r.street_name.as_str())
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Distinct blocks on a street, sorted.
    pub fn blocks_on_street(&self, street: &str) -> Vec<String> {
        let street = street.trim().to_uppercase();
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|r| r.street_name == street)
            .map(|r| r.block.as_str())
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Distinct flat types at a street/block, sorted.
    pub fn flat_types(&self, street: &str, block: &str) -> Vec<String> {
        let street = street.trim().to_uppercase();
        let block = block.trim().to_uppercase();
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|r| r.street_name == street && r.block == block)
            .map(|r| r.flat_type.as_str())
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Floor numbers observed at a street/block, sorted ascending.
    ///
    /// The union of `low..=high` over every parseable storey range at the
    /// block; malformed ranges contribute nothing.
    pub fn floors_for_block(&self, street: &str, block: &str) -> Vec<i32> {
        let street = street.trim().to_uppercase();
        let block = block.trim().to_uppercase();

        let mut floors = BTreeSet::new();
        for record in &self.records {
            if record.street_name != street || record.block != block {
                continue;
            }
            let Some(range) = record.storey_range.as_deref() else {
                continue;
            };
            if let Some((low, high)) = parse_storey_bounds(range) {
                floors.extend(low..=high);
            }
        }
        floors.into_iter().collect()
    }
}

/// Parse both bounds of a "<low> TO <high>" range. `None` when the
/// separator is missing or either bound is not an integer.
fn parse_storey_bounds(range: &str) -> Option<(i32, i32)> {
    let (low_text, high_text) = range.split_once("TO")?;
    let low = low_text.trim().parse().ok()?;
    let high = high_text.trim().parse().ok()?;
    Some((low, high))
}

/// Map required column names to header indices, case-insensitively.
/// Returns indices in `REQUIRED_COLUMNS` order.
fn resolve_columns(headers: &csv::StringRecord) -> Result<[usize; 7]> {
    let lowered: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut indices = [0usize; 7];
    let mut missing = Vec::new();

    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match lowered.iter().position(|h| h == name) {
            Some(index) => indices[slot] = index,
            None => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(DataError::MissingColumns(missing).into())
    }
}

// ============================================================================
// TESTS
// ============================================================================
