// 📐 Schema Normalizer - Aliases as Data
// Maps source-specific column names onto the canonical schema. Each source
// vintage renames its columns freely; the alias table absorbs that drift so
// new vintages only require adding aliases, never new code paths.

use crate::loader::RawTable;
use crate::model::SourceKind;
use serde::{Deserialize, Serialize};

// ============================================================================
// CANONICAL COLUMN NAMES
// ============================================================================

pub const COL_YEAR: &str = "Year";
pub const COL_TFR: &str = "TotalFertilityRate";
pub const COL_BIRTH_COUNT: &str = "BirthCount";
pub const COL_DATA_SERIES: &str = "DataSeries";
pub const COL_RESALE_INDEX: &str = "ResaleIndex";

// ============================================================================
// ALIAS MAP
// ============================================================================

/// Ordered canonical-name → candidate-aliases table. Candidate order is
/// priority order: the first alias present in the input wins. Matching is
/// exact-string and case-sensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasMap {
    entries: Vec<(String, Vec<String>)>,
}

impl AliasMap {
    pub fn new() -> Self {
        AliasMap { entries: Vec::new() }
    }

    /// Builder pattern: add one canonical column with its candidates.
    pub fn with(mut self, canonical: &str, candidates: &[&str]) -> Self {
        self.entries.push((
            canonical.to_string(),
            candidates.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Rename matching alias columns to their canonical names.
    ///
    /// - A canonical name already present is left untouched (idempotent).
    /// - Candidates are checked in declared order; first match wins.
    /// - A canonical name with no match is left absent, not synthesized —
    ///   absence is detected downstream by the coercion stage, and recorded
    ///   here in the report so the operator sees the schema drift.
    pub fn normalize(&self, mut table: RawTable) -> (RawTable, NormalizeReport) {
        let mut report = NormalizeReport::new();

        for (canonical, candidates) in &self.entries {
            if table.has_column(canonical) {
                continue;
            }

            let matched = candidates
                .iter()
                .find_map(|alias| table.column_index(alias).map(|idx| (alias, idx)));

            match matched {
                Some((alias, idx)) => {
                    table.headers[idx] = canonical.clone();
                    report.renamed.push((alias.clone(), canonical.clone()));
                }
                None => report.unmapped.push(canonical.clone()),
            }
        }

        (table, report)
    }
}

impl Default for AliasMap {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// NORMALIZE REPORT
// ============================================================================

/// What the normalizer did to one table. Unmapped canonical columns are not
/// fatal here; they surface downstream as all-missing payloads (or an empty
/// record set when Year itself is unmapped), so the report is the operator's
/// only visible signal of schema drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeReport {
    /// (original name, canonical name) pairs that were renamed
    pub renamed: Vec<(String, String)>,
    /// Canonical names with no alias match in the input
    pub unmapped: Vec<String>,
}

impl NormalizeReport {
    pub fn new() -> Self {
        NormalizeReport {
            renamed: Vec::new(),
            unmapped: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.unmapped.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} column(s) renamed, {} canonical column(s) unmapped",
            self.renamed.len(),
            self.unmapped.len()
        )
    }

    /// Operator-facing warning lines, prefixed with the source code.
    pub fn warnings(&self, source: SourceKind) -> Vec<String> {
        self.unmapped
            .iter()
            .map(|col| {
                format!(
                    "{}: no column matched canonical '{}' under any known alias",
                    source.code(),
                    col
                )
            })
            .collect()
    }
}

impl Default for NormalizeReport {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// BUILT-IN ALIAS TABLES (one per source, covering known vintages)
// ============================================================================

pub fn fertility_aliases() -> AliasMap {
    AliasMap::new()
        .with(COL_YEAR, &["year", "YEAR"])
        .with(
            COL_TFR,
            &[
                "TFR",
                "tfr",
                "Total Fertility Rate",
                "Total_FertilityRate",
                "Total_Fertility_Rate",
            ],
        )
}

pub fn births_aliases() -> AliasMap {
    AliasMap::new()
        .with(COL_YEAR, &["year", "YEAR"])
        .with(
            COL_BIRTH_COUNT,
            &[
                "births",
                "Births",
                "Resident_Live_Births",
                "Resident_Births",
                "value",
                "Value",
                "Birth_Count",
            ],
        )
        .with(
            COL_DATA_SERIES,
            &[
                "Data Series",
                "data_series",
                "Series",
                "Birth_Order",
                "Birth Order",
            ],
        )
}

pub fn housing_aliases() -> AliasMap {
    AliasMap::new()
        .with(COL_YEAR, &["year", "YEAR"])
        .with(
            COL_RESALE_INDEX,
            &[
                "HDB Index",
                "HDB_Index",
                "Resale_Index",
                "hdb_index",
                "value",
                "Value",
                "HDB_Resale_Index",
            ],
        )
}

/// Alias table for one source kind.
pub fn aliases_for(source: SourceKind) -> AliasMap {
    match source {
        SourceKind::Fertility => fertility_aliases(),
        SourceKind::Births => births_aliases(),
        SourceKind::Housing => housing_aliases(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_normalize_renames_alias() {
        let aliases = AliasMap::new().with("Year", &["year", "YEAR"]);
        let input = table(&["YEAR", "TFR"], &[&["2018", "1.14"]]);

        let (out, report) = aliases.normalize(input);

        assert_eq!(out.headers, vec!["Year", "TFR"]);
        assert_eq!(out.cell(0, "Year"), Some("2018"));
        assert!(!out.has_column("YEAR"));
        assert_eq!(report.renamed, vec![("YEAR".to_string(), "Year".to_string())]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_normalize_first_alias_wins() {
        let aliases = AliasMap::new().with("BirthCount", &["births", "value"]);
        let input = table(&["value", "births"], &[&["0", "100"]]);

        let (out, _) = aliases.normalize(input);

        // "births" is declared first, so it wins even though "value" comes
        // first in the file
        assert_eq!(out.headers, vec!["value", "BirthCount"]);
        assert_eq!(out.cell(0, "BirthCount"), Some("100"));
    }

    #[test]
    fn test_normalize_canonical_left_untouched() {
        let aliases = AliasMap::new().with("Year", &["year"]);
        let input = table(&["Year", "year"], &[&["2018", "1999"]]);

        let (out, report) = aliases.normalize(input);

        // Canonical column already present: the alias column must NOT be
        // renamed into a duplicate
        assert_eq!(out.headers, vec!["Year", "year"]);
        assert!(report.renamed.is_empty());
    }

    #[test]
    fn test_normalize_idempotent() {
        let aliases = births_aliases();
        let input = table(
            &["year", "Births", "Data Series"],
            &[&["2019", "100", "1st Birth Order"]],
        );

        let (once, _) = aliases.normalize(input);
        let (twice, report) = aliases.normalize(once.clone());

        assert_eq!(once, twice);
        assert!(report.renamed.is_empty());
    }

    #[test]
    fn test_normalize_unmapped_reported_not_synthesized() {
        let aliases = fertility_aliases();
        let input = table(&["year", "Fertility"], &[&["2018", "1.14"]]);

        let (out, report) = aliases.normalize(input);

        assert!(!out.has_column(COL_TFR));
        assert_eq!(report.unmapped, vec![COL_TFR.to_string()]);

        let warnings = report.warnings(SourceKind::Fertility);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("TotalFertilityRate"));
        assert!(warnings[0].starts_with("tfr:"));
    }

    #[test]
    fn test_normalize_case_sensitive() {
        let aliases = AliasMap::new().with("Year", &["year"]);
        let input = table(&["YEAR"], &[&["2018"]]);

        let (out, report) = aliases.normalize(input);

        // "YEAR" is not an alias here; exact-string matching means no rename
        assert!(out.has_column("YEAR"));
        assert_eq!(report.unmapped, vec!["Year".to_string()]);
    }

    #[test]
    fn test_builtin_housing_aliases() {
        let input = table(&["year", "hdb_index"], &[&["2020", "133.9"]]);
        let (out, report) = housing_aliases().normalize(input);

        assert_eq!(out.headers, vec![COL_YEAR, COL_RESALE_INDEX]);
        assert!(report.is_clean());
    }
}
