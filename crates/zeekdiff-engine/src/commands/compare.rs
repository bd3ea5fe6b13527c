//! Single-category comparison.
//!
//! ## Pipeline (in order):
//! 1. Look up the category's key fields
//! 2. Read both logs
//! 3. Project both sides and reconcile their effective fields
//! 4. Diff
//! 5. Report, with full source rows when requested
//!
//! Any failure skips the category; it never aborts the caller.

use crate::config::{EngineConfig, KeyFieldSpec};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use zeekdiff_core::errors::{CompareError, ExError, ExErrorKind, Result};
use zeekdiff_core::{
    diff, log_op_end, log_op_error, log_op_start, read_log, report_with, FieldStrategy,
    FormattedSummary, Projector, ReportOptions, SourceTables,
};

/// Options for a category comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompareOptions {
    pub strategy: FieldStrategy,
    pub report: ReportOptions,
}

impl CompareOptions {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            strategy: config.strategy,
            report: config.report.clone(),
        }
    }
}

/// A category that could not be compared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedCategory {
    pub category: String,
    pub kind: ExErrorKind,
    /// Stable error code, e.g. `ERR_NOT_FOUND`
    pub code: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl SkippedCategory {
    pub fn from_error(category: &str, err: &ExError) -> Self {
        Self {
            category: category.to_string(),
            kind: err.kind(),
            code: err.code().to_string(),
            reason: if err.message().is_empty() {
                err.to_string()
            } else {
                err.message().to_string()
            },
            path: err.path().map(str::to_string),
            fields: err.fields().map(<[String]>::to_vec),
        }
    }
}

/// Outcome of comparing one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryOutcome {
    Compared(FormattedSummary),
    Skipped(SkippedCategory),
}

impl CategoryOutcome {
    pub fn category(&self) -> &str {
        match self {
            CategoryOutcome::Compared(summary) => &summary.category,
            CategoryOutcome::Skipped(skip) => &skip.category,
        }
    }

    pub fn summary(&self) -> Option<&FormattedSummary> {
        match self {
            CategoryOutcome::Compared(summary) => Some(summary),
            CategoryOutcome::Skipped(_) => None,
        }
    }

    pub fn skipped(&self) -> Option<&SkippedCategory> {
        match self {
            CategoryOutcome::Compared(_) => None,
            CategoryOutcome::Skipped(skip) => Some(skip),
        }
    }

    /// Compared with no differences
    pub fn is_identical(&self) -> bool {
        self.summary().is_some_and(|s| s.identical)
    }

    /// Compared with differences
    pub fn is_divergent(&self) -> bool {
        self.summary().is_some_and(|s| !s.identical)
    }
}

/// Compare one category with the default strategy and report options.
pub fn compare(
    category: &str,
    cluster_log: &Path,
    offline_log: &Path,
    spec: &KeyFieldSpec,
) -> CategoryOutcome {
    compare_with(
        category,
        cluster_log,
        offline_log,
        spec,
        &CompareOptions::default(),
    )
}

/// Compare one category.
///
/// Failures of any kind are returned as [`CategoryOutcome::Skipped`] and
/// logged at `warn`.
pub fn compare_with(
    category: &str,
    cluster_log: &Path,
    offline_log: &Path,
    spec: &KeyFieldSpec,
    options: &CompareOptions,
) -> CategoryOutcome {
    let start = Instant::now();
    log_op_start!("compare_category", category = category);

    match compare_category(category, cluster_log, offline_log, spec, options) {
        Ok(summary) => {
            log_op_end!(
                "compare_category",
                duration_ms = start.elapsed().as_millis() as u64,
                category = category,
                identical = summary.identical,
                only_cluster = summary.cluster.exclusive,
                only_offline = summary.offline.exclusive
            );
            CategoryOutcome::Compared(summary)
        }
        Err(err) => {
            let err = err.or_category(category);
            log_op_error!(
                "compare_category",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                category = category
            );
            tracing::warn!(
                category = category,
                code = err.code(),
                reason = %err,
                "category skipped"
            );
            CategoryOutcome::Skipped(SkippedCategory::from_error(category, &err))
        }
    }
}

fn compare_category(
    category: &str,
    cluster_log: &Path,
    offline_log: &Path,
    spec: &KeyFieldSpec,
    options: &CompareOptions,
) -> Result<FormattedSummary> {
    let category_spec = spec.get(category).ok_or_else(|| -> ExError {
        CompareError::UnknownCategory {
            category: category.to_string(),
        }
        .into()
    })?;

    let cluster = read_log(cluster_log)?;
    let offline = read_log(offline_log)?;

    let projector = Projector::new(options.strategy).with_ordering_kinds(&category_spec.orderings);
    let (cluster_projection, offline_projection) =
        projector.project_pair(&cluster, &offline, &category_spec.fields)?;
    let result = diff(category, &cluster_projection, &offline_projection)?;

    let sources = SourceTables {
        cluster: &cluster,
        offline: &offline,
    };
    Ok(report_with(category, &result, &options.report, Some(sources)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategorySpec;
    use std::fs;

    const HEADER: &str = "#separator \\x09\n#fields\tts\tversion\tserver_name\n";

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("{HEADER}{body}")).unwrap();
        path
    }

    fn spec() -> KeyFieldSpec {
        KeyFieldSpec::new().with_category(
            "ssl",
            CategorySpec::new("ssl.log", ["version", "server_name"]),
        )
    }

    #[test]
    fn test_compare_identical() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.log", "1\tTLSv12\ta.com\n");
        let b = write(dir.path(), "b.log", "2\tTLSv12\ta.com\n");

        let outcome = compare("ssl", &a, &b, &spec());

        assert!(outcome.is_identical());
        assert_eq!(outcome.category(), "ssl");
    }

    #[test]
    fn test_unknown_category_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.log", "");

        let outcome = compare("smtp", &a, &a, &spec());

        let skip = outcome.skipped().unwrap();
        assert_eq!(skip.kind, ExErrorKind::NoComparableFields);
        assert_eq!(skip.category, "smtp");
    }

    #[test]
    fn test_missing_offline_file_is_skipped_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.log", "1\tTLSv12\ta.com\n");
        let missing = dir.path().join("missing.log");

        let outcome = compare("ssl", &a, &missing, &spec());

        let skip = outcome.skipped().unwrap();
        assert_eq!(skip.code, "ERR_NOT_FOUND");
        assert!(skip.path.as_deref().unwrap().ends_with("missing.log"));
    }

    #[test]
    fn test_strict_strategy_requires_every_key_field() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.log", "1\tTLSv12\ta.com\n");
        let spec = KeyFieldSpec::new().with_category(
            "ssl",
            CategorySpec::new("ssl.log", ["version", "server_name", "cipher"]),
        );
        let options = CompareOptions {
            strategy: FieldStrategy::Strict,
            ..CompareOptions::default()
        };

        let strict = compare_with("ssl", &a, &a, &spec, &options);
        let lenient = compare("ssl", &a, &a, &spec);

        assert_eq!(strict.skipped().unwrap().fields, Some(vec!["cipher".to_string()]));
        assert!(lenient.is_identical());
    }

    #[test]
    fn test_common_strategy_compares_on_shared_columns() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.log");
        fs::write(
            &a,
            "#fields\tts\tversion\tserver_name\tvalidation_status\n1\tTLSv12\ta.com\tok\n",
        )
        .unwrap();
        let b = write(dir.path(), "b.log", "2\tTLSv12\ta.com\n");
        let spec = KeyFieldSpec::new().with_category(
            "ssl",
            CategorySpec::new("ssl.log", ["version", "server_name", "validation_status"]),
        );
        let options = CompareOptions {
            strategy: FieldStrategy::Common,
            ..CompareOptions::default()
        };

        let common = compare_with("ssl", &a, &b, &spec, &options);
        let intersection = compare("ssl", &a, &b, &spec);

        assert!(common.is_identical());
        assert_eq!(
            common.summary().unwrap().fields,
            vec!["version".to_string(), "server_name".to_string()]
        );
        assert_eq!(intersection.skipped().unwrap().code, "ERR_SCHEMA_MISMATCH");
    }

    #[test]
    fn test_outcome_json_is_tagged() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.log", "1\tTLSv12\ta.com\n");
        let b = write(dir.path(), "b.log", "1\tTLSv13\tb.com\n");

        let json = serde_json::to_value(compare("ssl", &a, &b, &spec())).unwrap();

        assert_eq!(json["status"], "compared");
        assert_eq!(json["identical"], false);
        assert_eq!(json["offline"]["samples"][0]["key"][0], "TLSv13");
    }
}
