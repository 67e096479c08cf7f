// ➕ Aggregator - Births per year
// Reduces the births table to one total per year. The total is re-derived
// from every row rather than trusted from the TOTAL partition, which may be
// partial or absent in a given vintage.

use crate::model::{BirthRecord, YearTotal};
use std::collections::BTreeMap;

/// Sum non-missing birth counts per year, over ALL rows (totals and
/// breakdown alike — the classifier's partition is for the breakdown view,
/// not for this reduction).
///
/// A year whose every count is missing does not appear in the output at
/// all: "no data" must stay distinguishable from "zero births" for the
/// join downstream. Output is sorted by year ascending.
pub fn total_births_by_year(rows: &[BirthRecord]) -> Vec<YearTotal> {
    let mut sums: BTreeMap<i32, f64> = BTreeMap::new();

    for row in rows {
        if let Some(count) = row.count {
            *sums.entry(row.year).or_insert(0.0) += count;
        }
    }

    sums.into_iter()
        .map(|(year, total)| YearTotal { year, total })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
