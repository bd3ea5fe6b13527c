//! Whole-run orchestration over every configured category.

use crate::commands::compare::{compare_with, CategoryOutcome, CompareOptions, SkippedCategory};
use crate::config::EngineConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;
use zeekdiff_core::errors::{ExError, ExErrorKind};
use zeekdiff_core::{log_op_end, log_op_start};
use zeekdiff_core_types::RunId;

/// Result of comparing every configured category.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcap_path: Option<PathBuf>,
    pub cluster_log_dir: PathBuf,
    pub offline_log_dir: PathBuf,
    /// One outcome per category, in category order
    pub outcomes: Vec<CategoryOutcome>,
}

impl RunSummary {
    /// Categories that were compared, identical or not
    pub fn compared(&self) -> usize {
        self.outcomes.iter().filter(|o| o.summary().is_some()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.skipped().is_some()).count()
    }

    /// Compared categories with differences
    pub fn divergent(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_divergent()).count()
    }

    /// Every category compared and identical
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(CategoryOutcome::is_identical)
    }
}

/// Compare every configured category in order.
///
/// One category failing never stops the others.
pub fn run(config: &EngineConfig) -> RunSummary {
    execute(config, |jobs| jobs.iter().map(|job| job.compare()).collect())
}

/// As [`run`], with categories compared on scoped threads.
///
/// Outcomes are joined in category order, so the summary is identical to
/// the sequential one apart from run id and timestamp.
pub fn run_parallel(config: &EngineConfig) -> RunSummary {
    execute(config, |jobs| {
        let span = tracing::Span::current();
        thread::scope(|scope| {
            let handles: Vec<_> = jobs
                .iter()
                .map(|job| {
                    let span = span.clone();
                    let handle = scope.spawn(move || span.in_scope(|| job.compare()));
                    (job, handle)
                })
                .collect();
            handles
                .into_iter()
                .map(|(job, handle)| handle.join().unwrap_or_else(|_| job.panicked()))
                .collect()
        })
    })
}

struct Job<'a> {
    category: &'a str,
    cluster_log: PathBuf,
    offline_log: PathBuf,
    config: &'a EngineConfig,
    options: &'a CompareOptions,
}

impl Job<'_> {
    fn compare(&self) -> CategoryOutcome {
        compare_with(
            self.category,
            &self.cluster_log,
            &self.offline_log,
            &self.config.categories,
            self.options,
        )
    }

    fn panicked(&self) -> CategoryOutcome {
        let err = ExError::new(ExErrorKind::Internal)
            .with_op("compare_category")
            .with_category(self.category)
            .with_message("comparison worker panicked");
        tracing::error!(category = self.category, "comparison worker panicked");
        CategoryOutcome::Skipped(SkippedCategory::from_error(self.category, &err))
    }
}

fn execute<F>(config: &EngineConfig, compare_all: F) -> RunSummary
where
    F: FnOnce(&[Job<'_>]) -> Vec<CategoryOutcome>,
{
    let run_id = RunId::new();
    let started_at = Utc::now();
    let start = Instant::now();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _entered = span.enter();
    log_op_start!("run", categories = config.categories.len());

    let options = CompareOptions::from_config(config);
    let jobs: Vec<Job<'_>> = config
        .categories
        .iter()
        .map(|(category, spec)| Job {
            category,
            cluster_log: config.cluster_log_dir.join(&spec.log_file),
            offline_log: config.offline_log_dir.join(&spec.log_file),
            config,
            options: &options,
        })
        .collect();

    let outcomes = compare_all(&jobs);
    let summary = RunSummary {
        run_id,
        started_at,
        pcap_path: config.pcap_path.clone(),
        cluster_log_dir: config.cluster_log_dir.clone(),
        offline_log_dir: config.offline_log_dir.clone(),
        outcomes,
    };

    log_op_end!(
        "run",
        duration_ms = start.elapsed().as_millis() as u64,
        compared = summary.compared(),
        skipped = summary.skipped(),
        divergent = summary.divergent()
    );
    summary
}
