// 📊 Canonical Data Model
// Typed records the pipeline produces after schema normalization + coercion

use serde::{Deserialize, Serialize};

// ============================================================================
// SOURCE KINDS
// ============================================================================

/// SourceKind - Identifies which statistical table a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Fertility,
    Births,
    Housing,
}

impl SourceKind {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            SourceKind::Fertility => "Total fertility rate",
            SourceKind::Births => "Resident live births",
            SourceKind::Housing => "HDB resale index",
        }
    }

    /// Short code for internal use
    pub fn code(&self) -> &str {
        match self {
            SourceKind::Fertility => "tfr",
            SourceKind::Births => "births",
            SourceKind::Housing => "hdb",
        }
    }
}

// ============================================================================
// BASE RECORDS (one per source table, post-coercion)
// ============================================================================

/// One fertility observation. Year is unique within a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilityRecord {
    pub year: i32,
    /// Total fertility rate. None = value present in the file but unparsable,
    /// or the column never mapped to the canonical schema.
    pub tfr: Option<f64>,
}

/// One births observation. Multiple rows per year, distinguished by series
/// label (birth-order category or a precomputed total row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthRecord {
    pub year: i32,
    /// Series label as found in the source, whitespace-trimmed.
    /// None = the source table has no label column at all.
    pub series: Option<String>,
    pub count: Option<f64>,
}

/// One housing observation. Year is unique within a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingRecord {
    pub year: i32,
    pub index: Option<f64>,
}

// ============================================================================
// DERIVED RECORDS (rebuilt wholesale on every pipeline run)
// ============================================================================

/// Per-year total of non-missing birth counts. Years with no usable counts
/// do not appear at all ("no data" is not zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearTotal {
    pub year: i32,
    pub total: f64,
}

/// One row of the joined wide table. The fertility table is the join anchor,
/// so every JoinedRecord year exists in the fertility source; the other two
/// payloads are None wherever that source has no matching year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub year: i32,
    pub tfr: Option<f64>,
    pub birth_total: Option<f64>,
    pub resale_index: Option<f64>,
}

/// A non-total birth row, annotated for the breakdown view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRecord {
    pub year: i32,
    /// Equal to the source series label ("Births" when the source had none).
    pub birth_order: String,
    pub count: Option<f64>,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_names() {
        assert_eq!(SourceKind::Fertility.code(), "tfr");
        assert_eq!(SourceKind::Births.code(), "births");
        assert_eq!(SourceKind::Housing.name(), "HDB resale index");
    }

    #[test]
    fn test_records_serialize_roundtrip() {
        let rec = JoinedRecord {
            year: 2020,
            tfr: Some(1.1),
            birth_total: None,
            resale_index: Some(133.9),
        };

        let json = serde_json::to_string(&rec).unwrap();
        let back: JoinedRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(rec, back);
    }
}
