// Candidate selection - exact match on the three normalized address keys

use crate::record::ResaleRecord;

/// Select every record matching the street/block/flat-type triple.
///
/// Equality is exact; the keys are expected to be normalized (upper-cased,
/// trimmed) the same way the dataset was at load. No partial or fuzzy
/// matching. An empty result is a valid outcome, not an error - the caller
/// distinguishes "no matching records" from failure.
pub fn select_candidates<'a>(
    records: &'a [ResaleRecord],
    street_name: &str,
    block: &str,
    flat_type: &str,
) -> Vec<&'a ResaleRecord> {
    records
        .iter()
        .filter(|r| {
            r.street_name == street_name && r.block == block && r.flat_type == flat_type
        })
        .collect()
}
