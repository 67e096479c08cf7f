// Fertility Dashboard Core - Library
// Schema-reconciliation + multi-source aggregation pipeline over three
// annual statistical tables: total fertility rate, resident live births by
// birth order, and the HDB resale price index.

pub mod loader;
pub mod schema;     // Schema Normalizer - aliases as data
pub mod model;      // Canonical records
pub mod coerce;     // Type coercion + row filter
pub mod classify;   // Total vs breakdown series classifier
pub mod aggregate;  // Per-year birth totals
pub mod join;       // Left-anchored three-way merge
pub mod metrics;    // Range-scoped headline metrics + correlation
pub mod pipeline;   // Orchestration + snapshot cache
pub mod report;     // Presentation-facing formatting + JSON export

// Re-export commonly used types
pub use loader::{load_table, read_table, RawTable};
pub use schema::{
    aliases_for, births_aliases, fertility_aliases, housing_aliases,
    AliasMap, NormalizeReport,
    COL_BIRTH_COUNT, COL_DATA_SERIES, COL_RESALE_INDEX, COL_TFR, COL_YEAR,
};
pub use model::{
    BirthRecord, BreakdownRecord, FertilityRecord, HousingRecord,
    JoinedRecord, SourceKind, YearTotal,
};
pub use coerce::{birth_records, fertility_records, housing_records, parse_float, parse_year};
pub use classify::{order_like, order_view, Classified, SeriesClassifier, SYNTHETIC_SERIES_LABEL};
pub use aggregate::total_births_by_year;
pub use join::join_sources;
pub use metrics::{
    filter_breakdown_range, filter_range, tfr_housing_correlation,
    Correlation, Headline, RangeMetrics,
    MIN_CORRELATION_OBSERVATIONS, REPLACEMENT_LEVEL_TFR,
};
pub use pipeline::{DashboardPipeline, PipelineError, Snapshot, SourcePaths};
pub use report::{range_report, ModelScore, RangeReport, MODEL_COMPARISON};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
