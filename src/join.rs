// 🔗 Joiner - Left-anchored three-way merge on Year
// The fertility table is the anchor: its year set IS the output key set.
// Years the secondary sources lack read as missing payloads; years only a
// secondary source knows are dropped. The anchor defines the analysis
// horizon, deliberately — this is not a full outer join.

use crate::model::{FertilityRecord, HousingRecord, JoinedRecord, YearTotal};
use std::collections::HashMap;

/// Merge the three normalized series into the wide joined table, preserving
/// the anchor's row order. Duplicate years inside a secondary source resolve
/// to the first occurrence.
pub fn join_sources(
    fertility: &[FertilityRecord],
    birth_totals: &[YearTotal],
    housing: &[HousingRecord],
) -> Vec<JoinedRecord> {
    let mut totals_by_year: HashMap<i32, f64> = HashMap::new();
    for t in birth_totals {
        totals_by_year.entry(t.year).or_insert(t.total);
    }

    let mut index_by_year: HashMap<i32, Option<f64>> = HashMap::new();
    for h in housing {
        index_by_year.entry(h.year).or_insert(h.index);
    }

    fertility
        .iter()
        .map(|f| JoinedRecord {
            year: f.year,
            tfr: f.tfr,
            birth_total: totals_by_year.get(&f.year).copied(),
            resale_index: index_by_year.get(&f.year).copied().flatten(),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
