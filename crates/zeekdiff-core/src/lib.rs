//! zeekdiff Core - log reading, projection and set-difference kernel
//!
//! This crate provides the comparison engine for two captures of the same
//! event stream, one from a clustered producer and one from an offline
//! reference producer:
//! - Tagged tabular log reader (`#fields`/`#types` headers, tab-delimited rows)
//! - Per-category key-field projection with deduplication and total ordering
//! - Order- and duplicate-insensitive differ
//! - Bounded, deterministic reporting of divergent records
//! - Structured error and logging facilities shared by the other crates

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod project;
pub mod reader;
pub mod report;

#[doc(hidden)]
pub use zeekdiff_core_types as core_types;

// Re-export commonly used types
pub use diff::{diff, DiffResult, SideCounts};
pub use errors::{CompareError, ExError, ExErrorKind, Result};
pub use model::{LogHeader, LogTable, Row, Value};
pub use project::{
    project, reconcile_fields, FieldOrdering, FieldStrategy, LexicalOrdering, NaturalOrdering,
    OrderingKind, ProjectedTable, Projector,
};
pub use reader::{parse_log_str, read_log};
pub use report::{render_text, report, report_with, FormattedSummary, ReportOptions, SourceTables};
