//! zeekdiff Engine - configuration and orchestration layer
//!
//! Resolves per-category log paths from an [`EngineConfig`], drives the
//! core kernel (read, project, diff, report) for each category, and collects
//! the outcomes of a whole run into a [`RunSummary`].

pub mod commands;
pub mod config;
pub mod errors;
pub mod summary;

pub use commands::{
    compare, compare_with, run, run_parallel, CategoryOutcome, CompareOptions, RunSummary,
    SkippedCategory,
};
pub use config::{CategorySpec, EngineConfig, KeyFieldSpec};
pub use errors::ConfigError;
pub use summary::render_run_text;
