//! Category reports built from a [`crate::diff::DiffResult`].
//!
//! Reporting is pure formatting: nothing here reads files or changes the
//! diff. Samples are the first `sample_limit` exclusive rows per side, in
//! projection order.

pub mod human_summary;
pub mod model;

pub use human_summary::render_text;
pub use model::{
    report, report_with, FormattedSummary, ReportOptions, Sample, SideSummary, SourceTables,
    DEFAULT_SAMPLE_LIMIT,
};
