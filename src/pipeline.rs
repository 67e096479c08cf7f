// 🏗️ Dashboard Pipeline - Orchestration + snapshot cache
// Runs normalize → coerce → classify → aggregate → join over the three
// source files and caches the result as an immutable Snapshot. Reload is
// wholesale: invalidate and rebuild from scratch, never incremental.

use crate::aggregate::total_births_by_year;
use crate::classify::SeriesClassifier;
use crate::coerce::{birth_records, fertility_records, housing_records};
use crate::loader::{self, RawTable};
use crate::metrics::{filter_breakdown_range, filter_range};
use crate::model::{BreakdownRecord, JoinedRecord, SourceKind};
use crate::schema::aliases_for;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

// ============================================================================
// SOURCE CONFIGURATION
// ============================================================================

/// Externally-configured paths of the three source tables.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub fertility: PathBuf,
    pub births: PathBuf,
    pub housing: PathBuf,
}

impl SourcePaths {
    pub fn new(
        fertility: impl Into<PathBuf>,
        births: impl Into<PathBuf>,
        housing: impl Into<PathBuf>,
    ) -> Self {
        SourcePaths {
            fertility: fertility.into(),
            births: births.into(),
            housing: housing.into(),
        }
    }

    pub fn path(&self, source: SourceKind) -> &Path {
        match source {
            SourceKind::Fertility => &self.fertility,
            SourceKind::Births => &self.births,
            SourceKind::Housing => &self.housing,
        }
    }
}

// ============================================================================
// PIPELINE ERRORS
// ============================================================================

/// User-facing pipeline failures. Everything else degrades to missing
/// values; only these halt snapshot construction.
#[derive(Debug)]
pub enum PipelineError {
    /// A source file is absent or unreadable. No partial snapshot is built.
    MissingSource {
        source: SourceKind,
        path: PathBuf,
        reason: String,
    },
    /// The fertility (anchor) table produced zero usable rows, so the
    /// joined table would have no horizon at all.
    EmptyAnchor { path: PathBuf },
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::MissingSource { source, path, reason } => write!(
                f,
                "Missing source '{}' ({}): {}",
                source.name(),
                path.display(),
                reason
            ),
            PipelineError::EmptyAnchor { path } => write!(
                f,
                "Anchor table '{}' produced no usable rows; no analysis horizon",
                path.display()
            ),
        }
    }
}

impl std::error::Error for PipelineError {}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Immutable result of one pipeline run. The presentation layer only reads
/// this; it is replaced wholesale on reload.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Wide table over the full anchor horizon, in anchor order.
    pub joined: Vec<JoinedRecord>,
    /// Full-horizon breakdown rows (non-total birth rows).
    pub breakdown: Vec<BreakdownRecord>,
    pub min_year: i32,
    pub max_year: i32,
    /// Operator-facing schema-drift warnings collected during normalization.
    pub warnings: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn year_bounds(&self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    /// Range-filtered joined view, sorted by year ascending.
    pub fn range(&self, lo: i32, hi: i32) -> Vec<JoinedRecord> {
        filter_range(&self.joined, lo, hi)
    }

    /// Range-filtered breakdown view.
    pub fn breakdown_range(&self, lo: i32, hi: i32) -> Vec<BreakdownRecord> {
        filter_breakdown_range(&self.breakdown, lo, hi)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} joined year(s) [{}-{}], {} breakdown row(s), {} warning(s)",
            self.joined.len(),
            self.min_year,
            self.max_year,
            self.breakdown.len(),
            self.warnings.len()
        )
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Owns the source configuration and the cached snapshot. All stages are
/// pure over immutable inputs, so the cache is just memoization with an
/// explicit invalidate — no ambient global state.
pub struct DashboardPipeline {
    sources: SourcePaths,
    classifier: SeriesClassifier,
    snapshot: Option<Snapshot>,
}

impl DashboardPipeline {
    pub fn new(sources: SourcePaths) -> Self {
        DashboardPipeline {
            sources,
            classifier: SeriesClassifier::new(),
            snapshot: None,
        }
    }

    /// Builder pattern: swap in a synthetic total-label set.
    pub fn with_classifier(mut self, classifier: SeriesClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Cached snapshot, building it on first call.
    pub fn snapshot(&mut self) -> Result<&Snapshot, PipelineError> {
        if self.snapshot.is_none() {
            self.snapshot = Some(self.build()?);
        }
        // Populated just above
        Ok(self.snapshot.as_ref().unwrap())
    }

    /// Drop the cached snapshot. The next `snapshot()` call rebuilds from
    /// the source files.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    /// Invalidate + rebuild in one step (the collaborator's refresh signal).
    pub fn reload(&mut self) -> Result<&Snapshot, PipelineError> {
        self.invalidate();
        self.snapshot()
    }

    fn load_source(&self, source: SourceKind) -> Result<RawTable, PipelineError> {
        let path = self.sources.path(source);
        loader::load_table(path).map_err(|e| PipelineError::MissingSource {
            source,
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        })
    }

    /// One full pipeline run: normalize → coerce → classify → aggregate →
    /// join. Pure over the file contents; no state survives except the
    /// returned snapshot.
    fn build(&self) -> Result<Snapshot, PipelineError> {
        // 1. Load + normalize each source, collecting drift warnings
        let mut warnings = Vec::new();

        let (fertility_table, report) =
            aliases_for(SourceKind::Fertility).normalize(self.load_source(SourceKind::Fertility)?);
        warnings.extend(report.warnings(SourceKind::Fertility));

        let (births_table, report) =
            aliases_for(SourceKind::Births).normalize(self.load_source(SourceKind::Births)?);
        warnings.extend(report.warnings(SourceKind::Births));

        let (housing_table, report) =
            aliases_for(SourceKind::Housing).normalize(self.load_source(SourceKind::Housing)?);
        warnings.extend(report.warnings(SourceKind::Housing));

        // 2. Coerce + row-filter
        let fertility = fertility_records(&fertility_table);
        let births = birth_records(&births_table);
        let housing = housing_records(&housing_table);

        if fertility.is_empty() {
            return Err(PipelineError::EmptyAnchor {
                path: self.sources.fertility.clone(),
            });
        }

        // 3. Classify (breakdown view) + aggregate (re-derived totals)
        let classified = self.classifier.classify(&births);
        let birth_totals = total_births_by_year(&births);

        // 4. Join, anchored on fertility
        let joined = crate::join::join_sources(&fertility, &birth_totals, &housing);

        let min_year = joined.iter().map(|j| j.year).min().unwrap_or(0);
        let max_year = joined.iter().map(|j| j.year).max().unwrap_or(0);

        Ok(Snapshot {
            joined,
            breakdown: classified.breakdown,
            min_year,
            max_year,
            warnings,
            loaded_at: Utc::now(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
