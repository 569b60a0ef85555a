// Floor-band classification
// One threshold table, two input shapes: a single floor number (the unit
// being estimated) or a record's storey-range text (for bucketing
// comparable transactions).

use serde::{Deserialize, Serialize};

/// Highest floor still classified as Low.
pub const LOW_BAND_MAX_FLOOR: i32 = 6;

/// Highest floor still classified as Mid. Anything above is High.
pub const MID_BAND_MAX_FLOOR: i32 = 10;

/// Ordinal floor band derived per query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorBand {
    Low,
    Mid,
    High,
    /// Storey range missing, missing its "TO" separator, or with bounds
    /// that do not parse as integers.
    Unknown,
}

impl FloorBand {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            FloorBand::Low => "Low Floor",
            FloorBand::Mid => "Mid Floor",
            FloorBand::High => "High Floor",
            FloorBand::Unknown => "Unknown",
        }
    }

    /// Classify a single floor number.
    ///
    /// No lower bound is enforced: negative floors classify as Low.
    pub fn from_floor_number(floor: i32) -> FloorBand {
        if floor <= LOW_BAND_MAX_FLOOR {
            FloorBand::Low
        } else if floor <= MID_BAND_MAX_FLOOR {
            FloorBand::Mid
        } else {
            FloorBand::High
        }
    }

    /// Classify a storey-range text like "04 TO 06" by its lower bound.
    ///
    /// Malformed input is a first-class outcome, not an error: missing
    /// "TO" separator or a non-integer lower bound yields `Unknown`.
    pub fn from_storey_range(range: &str) -> FloorBand {
        let Some((low_text, _)) = range.split_once("TO") else {
            return FloorBand::Unknown;
        };

        match low_text.trim().parse::<i32>() {
            Ok(low) => FloorBand::from_floor_number(low),
            Err(_) => FloorBand::Unknown,
        }
    }
}

impl std::fmt::Display for FloorBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
