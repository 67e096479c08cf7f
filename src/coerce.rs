// 🔢 Type Coercion & Row Filter
// Turns a normalized RawTable into typed records. The key column (Year) and
// the value columns are coerced independently: an unparsable Year drops the
// whole row (a year you cannot identify cannot be joined or aggregated),
// while an unparsable value only leaves that cell missing.

use crate::loader::RawTable;
use crate::model::{BirthRecord, FertilityRecord, HousingRecord};
use crate::schema::{COL_BIRTH_COUNT, COL_DATA_SERIES, COL_RESALE_INDEX, COL_TFR, COL_YEAR};

// ============================================================================
// NUMERIC PARSES
// ============================================================================

/// Parse a year cell. Accepts any finite numeric rendering and truncates
/// toward zero, so "2018" and "2018.0" both coerce to 2018. Empty or
/// non-numeric cells are missing.
pub fn parse_year(raw: &str) -> Option<i32> {
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }

    let truncated = value.trunc();
    if truncated < i32::MIN as f64 || truncated > i32::MAX as f64 {
        return None;
    }

    Some(truncated as i32)
}

/// Parse a value cell to a nullable float. Non-finite results count as
/// missing, never as a coercion default.
pub fn parse_float(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

// ============================================================================
// RECORD EXTRACTION (per source)
// ============================================================================

/// Fertility table → records. Rows with an unparsable Year are dropped;
/// an absent TFR column yields all-None payloads (lenient mode — the
/// normalizer has already reported the drift).
pub fn fertility_records(table: &RawTable) -> Vec<FertilityRecord> {
    let year_col = match table.column_index(COL_YEAR) {
        Some(idx) => idx,
        None => return Vec::new(),
    };
    let tfr_col = table.column_index(COL_TFR);

    table
        .rows
        .iter()
        .filter_map(|row| {
            let year = parse_year(&row[year_col])?;
            let tfr = tfr_col.and_then(|idx| parse_float(&row[idx]));
            Some(FertilityRecord { year, tfr })
        })
        .collect()
}

/// Births table → records. The series label is trimmed but otherwise kept
/// verbatim; it is None only when the source has no label column at all,
/// which the classifier turns into the synthetic "Births" label.
pub fn birth_records(table: &RawTable) -> Vec<BirthRecord> {
    let year_col = match table.column_index(COL_YEAR) {
        Some(idx) => idx,
        None => return Vec::new(),
    };
    let count_col = table.column_index(COL_BIRTH_COUNT);
    let series_col = table.column_index(COL_DATA_SERIES);

    table
        .rows
        .iter()
        .filter_map(|row| {
            let year = parse_year(&row[year_col])?;
            let count = count_col.and_then(|idx| parse_float(&row[idx]));
            let series = series_col.map(|idx| row[idx].trim().to_string());
            Some(BirthRecord { year, series, count })
        })
        .collect()
}

/// Housing table → records.
pub fn housing_records(table: &RawTable) -> Vec<HousingRecord> {
    let year_col = match table.column_index(COL_YEAR) {
        Some(idx) => idx,
        None => return Vec::new(),
    };
    let index_col = table.column_index(COL_RESALE_INDEX);

    table
        .rows
        .iter()
        .filter_map(|row| {
            let year = parse_year(&row[year_col])?;
            let index = index_col.and_then(|idx| parse_float(&row[idx]));
            Some(HousingRecord { year, index })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
