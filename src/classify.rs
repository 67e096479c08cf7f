// 🏷️ Series Classifier - Total vs Breakdown
// Partitions birth rows into TOTAL rows (precomputed aggregates present in
// some vintages) and BREAKDOWN rows (one per birth-order category). The
// policy favors false negatives: an unrecognized total-like label lands in
// BREAKDOWN, because the aggregator re-derives totals itself and must never
// double count a row it mistook for a component.

use crate::model::{BirthRecord, BreakdownRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Synthetic label used when the source table has no series column.
pub const SYNTHETIC_SERIES_LABEL: &str = "Births";

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Classifies birth rows against an injectable allow-list of total labels.
/// Matching is exact after whitespace trimming; case variants must be listed
/// explicitly (the defaults carry both "Total" and "TOTAL").
pub struct SeriesClassifier {
    total_labels: HashSet<String>,
}

impl SeriesClassifier {
    /// Classifier with the known total labels of the published vintages.
    pub fn new() -> Self {
        Self::with_labels([
            "Resident Live-Births By Birth Order",
            "Resident Live Births By Birth Order",
            "Resident Live-Births",
            "Resident Live Births",
            "Total",
            "TOTAL",
        ])
    }

    /// Classifier over a caller-supplied label set.
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SeriesClassifier {
            total_labels: labels.into_iter().map(|l| l.into()).collect(),
        }
    }

    pub fn is_total(&self, label: &str) -> bool {
        self.total_labels.contains(label.trim())
    }

    /// Partition rows into TOTAL and BREAKDOWN sets. Rows without a label
    /// (source had no series column) are BREAKDOWN under the synthetic
    /// "Births" label.
    pub fn classify(&self, rows: &[BirthRecord]) -> Classified {
        let mut totals = Vec::new();
        let mut breakdown = Vec::new();

        for row in rows {
            match &row.series {
                Some(label) if self.is_total(label) => totals.push(row.clone()),
                Some(label) => breakdown.push(BreakdownRecord {
                    year: row.year,
                    birth_order: label.trim().to_string(),
                    count: row.count,
                }),
                None => breakdown.push(BreakdownRecord {
                    year: row.year,
                    birth_order: SYNTHETIC_SERIES_LABEL.to_string(),
                    count: row.count,
                }),
            }
        }

        Classified { totals, breakdown }
    }
}

impl Default for SeriesClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one classification pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classified {
    pub totals: Vec<BirthRecord>,
    pub breakdown: Vec<BreakdownRecord>,
}

impl Classified {
    pub fn summary(&self) -> String {
        format!(
            "{} total row(s), {} breakdown row(s)",
            self.totals.len(),
            self.breakdown.len()
        )
    }
}

// ============================================================================
// ORDER-LIKE FILTER (breakdown view)
// ============================================================================

const ORDER_KEYWORDS: [&str; 11] = [
    "1", "2", "3", "4", "5", "first", "second", "third", "fourth", "fifth", "order",
];

/// True when a label reads like a birth-order category ("1st Birth Order",
/// "Second", ...). Case-insensitive substring match against the keyword list.
pub fn order_like(label: &str) -> bool {
    let lower = label.to_lowercase();
    ORDER_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Breakdown rows restricted to order-like labels with a usable count.
/// This is what the by-birth-order view plots; rows with a missing count
/// carry no information there.
pub fn order_view(rows: &[BreakdownRecord]) -> Vec<BreakdownRecord> {
    rows.iter()
        .filter(|r| r.count.is_some() && order_like(&r.birth_order))
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
