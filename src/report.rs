// 🖨️ Range Report - Presentation-facing values
// Formats headline metrics the way the dashboard displays them ("—" for
// missing, signed deltas with per-metric precision) and bundles a range
// selection into one serializable report for the presentation collaborator.

use crate::metrics::{tfr_housing_correlation, RangeMetrics};
use crate::model::BreakdownRecord;
use crate::pipeline::Snapshot;
use anyhow::Result;
use serde::Serialize;

/// Marker shown for a missing value.
pub const MISSING_MARKER: &str = "—";

// ============================================================================
// METRIC FORMATTING
// ============================================================================

pub fn fmt_tfr(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => MISSING_MARKER.to_string(),
    }
}

pub fn fmt_births(value: Option<f64>) -> String {
    match value {
        Some(v) => group_thousands(v.round() as i64),
        None => MISSING_MARKER.to_string(),
    }
}

pub fn fmt_index(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => MISSING_MARKER.to_string(),
    }
}

/// Signed TFR delta ("+0.012" / "-0.200"); None when unavailable.
pub fn fmt_tfr_delta(delta: Option<f64>) -> Option<String> {
    delta.map(|d| format!("{:+.3}", d))
}

pub fn fmt_births_delta(delta: Option<f64>) -> Option<String> {
    delta.map(|d| format!("{:+}", d.round() as i64))
}

pub fn fmt_index_delta(delta: Option<f64>) -> Option<String> {
    delta.map(|d| format!("{:+.1}", d))
}

/// "39,260"-style grouping for birth counts.
fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

// ============================================================================
// RANGE REPORT
// ============================================================================

/// Everything the presentation layer needs for one [lo, hi] selection.
#[derive(Debug, Clone, Serialize)]
pub struct RangeReport {
    pub lo: i32,
    pub hi: i32,
    /// None when the range covers no rows.
    pub metrics: Option<RangeMetrics>,
    /// None = insufficient data, never a placeholder number.
    pub correlation: Option<f64>,
    /// Order-like breakdown rows in range, missing counts dropped.
    pub breakdown: Vec<BreakdownRecord>,
    pub warnings: Vec<String>,
}

impl RangeReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        match &self.metrics {
            Some(m) => format!(
                "[{}-{}] latest {}: TFR {}, births {}, HDB index {}",
                self.lo,
                self.hi,
                m.latest_year,
                fmt_tfr(m.tfr.latest),
                fmt_births(m.births.latest),
                fmt_index(m.housing.latest)
            ),
            None => format!("[{}-{}] no rows in range", self.lo, self.hi),
        }
    }
}

/// Build the report for one range selection over a snapshot.
pub fn range_report(snapshot: &Snapshot, lo: i32, hi: i32) -> RangeReport {
    let view = snapshot.range(lo, hi);
    let metrics = RangeMetrics::compute(&view);
    let correlation = tfr_housing_correlation(&view).value();
    let breakdown = crate::classify::order_view(&snapshot.breakdown_range(lo, hi));

    RangeReport {
        lo,
        hi,
        metrics,
        correlation,
        breakdown,
        warnings: snapshot.warnings.clone(),
    }
}

// ============================================================================
// MODEL COMPARISON (static, precomputed offline — not computed by this core)
// ============================================================================

/// Precomputed evaluation figures for the TFR forecasting models the
/// dashboard compares. The lag-1 baseline wins; adding the HDB index
/// worsens accuracy.
#[derive(Debug, Clone, Serialize)]
pub struct ModelScore {
    pub model: &'static str,
    pub mae: f64,
    pub rmse: f64,
    pub r_squared: f64,
}

pub const MODEL_COMPARISON: [ModelScore; 3] = [
    ModelScore {
        model: "Naïve lag-1 baseline",
        mae: 0.0320,
        rmse: 0.0412,
        r_squared: 0.7689,
    },
    ModelScore {
        model: "Lag regression model",
        mae: 0.0394,
        rmse: 0.0477,
        r_squared: 0.6901,
    },
    ModelScore {
        model: "Extended model (lag + HDB index)",
        mae: 0.1623,
        rmse: 0.1676,
        r_squared: -2.8166,
    },
];

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Headline;

    #[test]
    fn test_fmt_missing_marker() {
        assert_eq!(fmt_tfr(None), "—");
        assert_eq!(fmt_births(None), "—");
        assert_eq!(fmt_index(None), "—");
        assert_eq!(fmt_tfr_delta(None), None);
    }

    #[test]
    fn test_fmt_precision_per_metric() {
        assert_eq!(fmt_tfr(Some(1.096)), "1.10");
        assert_eq!(fmt_births(Some(39260.0)), "39,260");
        assert_eq!(fmt_index(Some(133.94)), "133.9");
        assert_eq!(fmt_tfr_delta(Some(-0.2)), Some("-0.200".to_string()));
        assert_eq!(fmt_births_delta(Some(-523.0)), Some("-523".to_string()));
        assert_eq!(fmt_index_delta(Some(5.0)), Some("+5.0".to_string()));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-39260), "-39,260");
    }

    #[test]
    fn test_report_summary_no_rows() {
        let report = RangeReport {
            lo: 1990,
            hi: 1991,
            metrics: None,
            correlation: None,
            breakdown: Vec::new(),
            warnings: Vec::new(),
        };

        assert!(report.summary().contains("no rows in range"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = RangeReport {
            lo: 2018,
            hi: 2020,
            metrics: Some(RangeMetrics {
                latest_year: 2020,
                previous_year: Some(2019),
                tfr: Headline { latest: Some(0.9), delta: None },
                births: Headline { latest: Some(280.0), delta: Some(-20.0) },
                housing: Headline { latest: None, delta: None },
            }),
            correlation: None,
            breakdown: Vec::new(),
            warnings: vec!["tfr: drift".to_string()],
        };

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["lo"], 2018);
        assert_eq!(value["metrics"]["latest_year"], 2020);
        assert!(value["correlation"].is_null());
        assert_eq!(value["warnings"][0], "tfr: drift");
    }

    #[test]
    fn test_model_comparison_constants() {
        assert_eq!(MODEL_COMPARISON.len(), 3);
        assert_eq!(MODEL_COMPARISON[0].model, "Naïve lag-1 baseline");
        assert!(MODEL_COMPARISON[2].r_squared < 0.0);
    }
}
