//! Comparison orchestration.
//!
//! [`compare`] handles one category pair of log files; [`run`] and
//! [`run_parallel`] handle every configured category of a run.

pub mod compare;
pub mod run;

pub use compare::{compare, compare_with, CategoryOutcome, CompareOptions, SkippedCategory};
pub use run::{run, run_parallel, RunSummary};
