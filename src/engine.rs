// Estimation engine - composes filtering, floor classification and
// price synthesis to answer one query.

use crate::dataset::Dataset;
use crate::estimator::{prepare_candidates, summarize_for_band, FloorBandSummary};
use crate::filter::select_candidates;
use crate::floors::FloorBand;
use serde::{Deserialize, Serialize};

// ============================================================================
// QUERY
// ============================================================================

/// One estimation request. Constructed and consumed per interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub street_name: String,
    pub block: String,
    pub flat_type: String,
    pub floor_number: i32,
}

impl Query {
    pub fn new(street_name: &str, block: &str, flat_type: &str, floor_number: i32) -> Query {
        Query {
            street_name: street_name.to_string(),
            block: block.to_string(),
            flat_type: flat_type.to_string(),
            floor_number,
        }
    }

    /// The floor band the queried unit falls in.
    pub fn floor_band(&self) -> FloorBand {
        FloorBand::from_floor_number(self.floor_number)
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of one query. Exactly one of three outcomes; the two negative
/// cases are expected results with distinct messaging, not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Estimation {
    /// Candidates existed and at least one shared the queried floor band.
    Estimate(FloorBandSummary),
    /// Zero records match the street/block/flat-type query.
    NoCandidates,
    /// Candidates exist, but none in the queried floor band.
    NoFloorBandMatch,
}

impl Estimation {
    /// Message for the negative outcomes, worded for direct display.
    pub fn message(&self) -> &str {
        match self {
            Estimation::Estimate(_) => "",
            Estimation::NoCandidates => {
                "No matching records found. Try a different flat type or block."
            }
            Estimation::NoFloorBandMatch => {
                "No data for this floor level; contact an agent to learn more."
            }
        }
    }
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Answer one query against the immutable dataset snapshot.
///
/// Pure function of its inputs; no state is retained between calls. Query
/// keys are normalized the same way records were at load, so lower-case
/// input matches the stored upper-case values.
pub fn estimate(dataset: &Dataset, query: &Query) -> Estimation {
    let street_name = query.street_name.trim().to_uppercase();
    let block = query.block.trim().to_uppercase();
    let flat_type = query.flat_type.trim().to_uppercase();

    let candidates = select_candidates(dataset.records(), &street_name, &block, &flat_type);
    if candidates.is_empty() {
        return Estimation::NoCandidates;
    }

    let prepared = prepare_candidates(&candidates);
    match summarize_for_band(&prepared, query.floor_band()) {
        Some(summary) => Estimation::Estimate(summary),
        None => Estimation::NoFloorBandMatch,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CSV: &str = "\
month,street_name,block,flat_type,storey_range,floor_area_sqm,resale_price
2023-06,ANG MO KIO AVE 3,123A,4 ROOM,04 TO 06,90,450000
2023-01,ANG MO KIO AVE 3,123A,4 ROOM,04 TO 06,90,430000
2022-12,ANG MO KIO AVE 3,123A,4 ROOM,11 TO 15,93,495000
2023-03,BEDOK NORTH RD,45,3 ROOM,11 TO 15,67,320000
";

    fn create_test_dataset() -> Dataset {
        Dataset::from_reader(TEST_CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_estimate_happy_path() {
        let dataset = create_test_dataset();
        let query = Query::new("ANG MO KIO AVE 3", "123A", "4 ROOM", 5);

        match estimate(&dataset, &query) {
            Estimation::Estimate(summary) => {
                assert_eq!(summary.price_range_text, "SGD 420,000 – 450,000");
                assert_eq!(summary.recent_transactions.len(), 2);
            }
            other => panic!("expected estimate, got {:?}", other),
        }
    }

    #[test]
    fn test_query_keys_are_case_insensitive() {
        let dataset = create_test_dataset();
        let query = Query::new("ang mo kio ave 3", " 123a ", "4 room", 5);

        assert!(matches!(
            estimate(&dataset, &query),
            Estimation::Estimate(_)
        ));
    }

    #[test]
    fn test_no_candidates_outcome() {
        let dataset = create_test_dataset();
        let query = Query::new("PUNGGOL FIELD", "99", "4 ROOM", 5);

        assert!(matches!(
            estimate(&dataset, &query),
            Estimation::NoCandidates
        ));
    }

    #[test]
    fn test_no_floor_band_match_outcome() {
        let dataset = create_test_dataset();
        // Bedok block only has High-band records; floor 8 is Mid.
        let query = Query::new("BEDOK NORTH RD", "45", "3 ROOM", 8);

        assert!(matches!(
            estimate(&dataset, &query),
            Estimation::NoFloorBandMatch
        ));
    }

    #[test]
    fn test_outcomes_are_distinct_messages() {
        assert_ne!(
            Estimation::NoCandidates.message(),
            Estimation::NoFloorBandMatch.message()
        );
    }

    #[test]
    fn test_query_floor_band() {
        assert_eq!(Query::new("X", "1", "Y", 3).floor_band(), FloorBand::Low);
        assert_eq!(Query::new("X", "1", "Y", 8).floor_band(), FloorBand::Mid);
        assert_eq!(Query::new("X", "1", "Y", 12).floor_band(), FloorBand::High);
    }

    #[test]
    fn test_estimate_is_pure_across_calls() {
        let dataset = create_test_dataset();
        let query = Query::new("ANG MO KIO AVE 3", "123A", "4 ROOM", 12);

        let first = serde_json::to_string(&estimate(&dataset, &query)).unwrap();
        let second = serde_json::to_string(&estimate(&dataset, &query)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_outcome_serialization_tags() {
        let json = serde_json::to_string(&Estimation::NoCandidates).unwrap();
        assert!(json.contains("no_candidates"));

        let dataset = create_test_dataset();
        let query = Query::new("ANG MO KIO AVE 3", "123A", "4 ROOM", 12);
        let json = serde_json::to_string(&estimate(&dataset, &query)).unwrap();
        assert!(json.contains("\"outcome\":\"estimate\""));
    }
}
