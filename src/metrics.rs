// 📈 Metrics Engine - Range-scoped derived values
// Given the joined table and an inclusive year range, computes the headline
// figures the dashboard shows: latest value, period-over-period delta, and
// the TFR-vs-housing correlation. Every "not computable" outcome is an
// explicit unavailable marker, never zero and never an error.

use crate::model::{BreakdownRecord, JoinedRecord};
use serde::{Deserialize, Serialize};

/// Replacement-level fertility, drawn on the TFR chart.
pub const REPLACEMENT_LEVEL_TFR: f64 = 2.1;

/// Minimum paired observations for a correlation to be reported.
pub const MIN_CORRELATION_OBSERVATIONS: usize = 3;

// ============================================================================
// RANGE FILTER
// ============================================================================

/// Rows with lo <= year <= hi, stably sorted by year ascending.
pub fn filter_range(joined: &[JoinedRecord], lo: i32, hi: i32) -> Vec<JoinedRecord> {
    let mut view: Vec<JoinedRecord> = joined
        .iter()
        .filter(|r| r.year >= lo && r.year <= hi)
        .cloned()
        .collect();
    view.sort_by_key(|r| r.year);
    view
}

/// Same range filter for the breakdown rows.
pub fn filter_breakdown_range(
    rows: &[BreakdownRecord],
    lo: i32,
    hi: i32,
) -> Vec<BreakdownRecord> {
    let mut view: Vec<BreakdownRecord> = rows
        .iter()
        .filter(|r| r.year >= lo && r.year <= hi)
        .cloned()
        .collect();
    view.sort_by_key(|r| r.year);
    view
}

// ============================================================================
// HEADLINES (latest / previous / delta per metric column)
// ============================================================================

/// Latest value and period-over-period delta for one metric column.
/// `latest` is None when the latest row has no data for this column;
/// `delta` is None when either endpoint is missing or the view has a single
/// row (previous aliases latest, so no delta exists).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub latest: Option<f64>,
    pub delta: Option<f64>,
}

impl Headline {
    fn compute(latest: Option<f64>, previous: Option<f64>, can_delta: bool) -> Self {
        let delta = match (can_delta, latest, previous) {
            (true, Some(l), Some(p)) => Some(l - p),
            _ => None,
        };
        Headline { latest, delta }
    }
}

/// Headline metrics for a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeMetrics {
    pub latest_year: i32,
    /// Second-highest year in the view; None for a single-row view.
    pub previous_year: Option<i32>,
    pub tfr: Headline,
    pub births: Headline,
    pub housing: Headline,
}

impl RangeMetrics {
    /// Compute headlines from a range-filtered view (must be sorted by year
    /// ascending, as `filter_range` returns it). None for an empty view.
    pub fn compute(view: &[JoinedRecord]) -> Option<RangeMetrics> {
        let latest = view.last()?;
        let can_delta = view.len() >= 2;

        // Previous aliases latest when the view has a single row; deltas are
        // suppressed in that case regardless of the values
        let previous = if can_delta { &view[view.len() - 2] } else { latest };

        Some(RangeMetrics {
            latest_year: latest.year,
            previous_year: can_delta.then(|| previous.year),
            tfr: Headline::compute(latest.tfr, previous.tfr, can_delta),
            births: Headline::compute(latest.birth_total, previous.birth_total, can_delta),
            housing: Headline::compute(latest.resale_index, previous.resale_index, can_delta),
        })
    }
}

// ============================================================================
// CORRELATION
// ============================================================================

/// Outcome of a correlation request. InsufficientData covers both too few
/// paired observations and a zero-variance column (where the coefficient is
/// undefined) — never a placeholder number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Correlation {
    Coefficient(f64),
    InsufficientData,
}

impl Correlation {
    pub fn value(&self) -> Option<f64> {
        match self {
            Correlation::Coefficient(r) => Some(*r),
            Correlation::InsufficientData => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Correlation::Coefficient(_))
    }
}

/// Pearson correlation between TFR and the resale index over the view,
/// using only rows where both are non-missing.
pub fn tfr_housing_correlation(view: &[JoinedRecord]) -> Correlation {
    let pairs: Vec<(f64, f64)> = view
        .iter()
        .filter_map(|r| match (r.tfr, r.resale_index) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        })
        .collect();

    if pairs.len() < MIN_CORRELATION_OBSERVATIONS {
        return Correlation::InsufficientData;
    }

    match pearson(&pairs) {
        Some(r) => Correlation::Coefficient(r),
        None => Correlation::InsufficientData,
    }
}

/// Standard Pearson linear correlation coefficient, range [-1, 1].
/// None when either column has zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some((cov / denom).clamp(-1.0, 1.0))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(year: i32, tfr: Option<f64>, births: Option<f64>, hdb: Option<f64>) -> JoinedRecord {
        JoinedRecord {
            year,
            tfr,
            birth_total: births,
            resale_index: hdb,
        }
    }

    #[test]
    fn test_filter_range_inclusive_and_sorted() {
        let table = vec![
            joined(2021, None, None, None),
            joined(2018, None, None, None),
            joined(2019, None, None, None),
        ];

        let view = filter_range(&table, 2018, 2019);

        let years: Vec<i32> = view.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2018, 2019]);
    }

    #[test]
    fn test_metrics_single_row_no_delta() {
        let view = filter_range(&[joined(2020, Some(0.9), Some(280.0), None)], 2020, 2020);
        let metrics = RangeMetrics::compute(&view).unwrap();

        assert_eq!(metrics.latest_year, 2020);
        assert_eq!(metrics.previous_year, None);
        assert_eq!(metrics.tfr.latest, Some(0.9));
        assert_eq!(metrics.tfr.delta, None);
        assert_eq!(metrics.births.delta, None);
    }

    #[test]
    fn test_metrics_empty_view() {
        assert_eq!(RangeMetrics::compute(&[]), None);
    }

    #[test]
    fn test_metrics_delta_from_two_rows() {
        let view = vec![
            joined(2019, Some(1.1), Some(300.0), Some(150.0)),
            joined(2020, Some(0.9), Some(280.0), Some(155.0)),
        ];

        let metrics = RangeMetrics::compute(&view).unwrap();

        assert_eq!(metrics.latest_year, 2020);
        assert_eq!(metrics.previous_year, Some(2019));
        assert!((metrics.tfr.delta.unwrap() - (-0.2)).abs() < 1e-12);
        assert_eq!(metrics.births.delta, Some(-20.0));
        assert_eq!(metrics.housing.delta, Some(5.0));
    }

    #[test]
    fn test_metrics_missing_endpoint_suppresses_delta() {
        // Latest present, previous missing: no delta, latest still reported
        let view = vec![
            joined(2019, None, Some(300.0), None),
            joined(2020, Some(0.9), None, Some(155.0)),
        ];

        let metrics = RangeMetrics::compute(&view).unwrap();

        assert_eq!(metrics.tfr.latest, Some(0.9));
        assert_eq!(metrics.tfr.delta, None);
        assert_eq!(metrics.births.latest, None);
        assert_eq!(metrics.births.delta, None);
        assert_eq!(metrics.housing.delta, None);
    }

    #[test]
    fn test_correlation_insufficient_below_three_pairs() {
        let view = vec![
            joined(2019, Some(1.1), None, Some(150.0)),
            joined(2020, Some(0.9), None, Some(155.0)),
            // third row has only one side of the pair
            joined(2021, Some(0.95), None, None),
        ];

        assert_eq!(tfr_housing_correlation(&view), Correlation::InsufficientData);
    }

    #[test]
    fn test_correlation_perfect_linear_is_one() {
        let view = vec![
            joined(2018, Some(1.0), None, Some(100.0)),
            joined(2019, Some(2.0), None, Some(110.0)),
            joined(2020, Some(3.0), None, Some(120.0)),
        ];

        let r = tfr_housing_correlation(&view).value().unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_negative_relationship() {
        let view = vec![
            joined(2018, Some(3.0), None, Some(100.0)),
            joined(2019, Some(2.0), None, Some(110.0)),
            joined(2020, Some(1.0), None, Some(120.0)),
        ];

        let r = tfr_housing_correlation(&view).value().unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_zero_variance_unavailable() {
        let view = vec![
            joined(2018, Some(1.0), None, Some(100.0)),
            joined(2019, Some(1.0), None, Some(110.0)),
            joined(2020, Some(1.0), None, Some(120.0)),
        ];

        assert_eq!(tfr_housing_correlation(&view), Correlation::InsufficientData);
    }

    #[test]
    fn test_pearson_skips_nothing_given_clean_pairs() {
        let r = pearson(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (4.0, 8.0)]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }
}
