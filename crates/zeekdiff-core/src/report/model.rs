//! Report types and construction.

use crate::diff::DiffResult;
use crate::model::{LogTable, Row, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of example rows shown per side
pub const DEFAULT_SAMPLE_LIMIT: usize = 5;

/// Controls how much of each divergent side is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Maximum example rows per side
    pub sample_limit: usize,
    /// Attach full source rows to each sample (needs [`SourceTables`])
    pub full_rows: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            full_rows: false,
        }
    }
}

/// The unprojected tables a diff was computed from.
#[derive(Debug, Clone, Copy)]
pub struct SourceTables<'a> {
    pub cluster: &'a LogTable,
    pub offline: &'a LogTable,
}

/// One example row from an exclusive side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Projected values
    pub key: Row,
    /// Every source row that projects onto `key`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_rows: Option<Vec<Row>>,
}

/// Counts and samples for one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideSummary {
    pub source_rows: usize,
    pub projected_rows: usize,
    pub digest: String,
    /// Number of rows only this side has
    pub exclusive: usize,
    /// Column names of the source table, present with full-row samples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_columns: Option<Vec<String>>,
    pub samples: Vec<Sample>,
}

/// Structured report for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedSummary {
    pub category: String,
    pub fields: Vec<String>,
    pub identical: bool,
    pub shared: usize,
    pub cluster: SideSummary,
    pub offline: SideSummary,
}

impl FormattedSummary {
    /// Whether either side has rows the other lacks
    pub fn is_divergent(&self) -> bool {
        !self.identical
    }
}

impl fmt::Display for FormattedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::report::human_summary::render_text(self))
    }
}

/// Build a report with default options and no source tables.
pub fn report(category: &str, diff: &DiffResult) -> FormattedSummary {
    report_with(category, diff, &ReportOptions::default(), None)
}

/// Build a report.
///
/// Full-row samples are attached only when `options.full_rows` is set and
/// `sources` is given.
pub fn report_with(
    category: &str,
    diff: &DiffResult,
    options: &ReportOptions,
    sources: Option<SourceTables<'_>>,
) -> FormattedSummary {
    let sources = sources.filter(|_| options.full_rows);
    let cluster = side_summary(
        diff,
        &diff.only_cluster,
        Side::Cluster,
        options.sample_limit,
        sources.map(|s| s.cluster),
    );
    let offline = side_summary(
        diff,
        &diff.only_offline,
        Side::Offline,
        options.sample_limit,
        sources.map(|s| s.offline),
    );

    FormattedSummary {
        category: category.to_string(),
        fields: diff.fields.clone(),
        identical: diff.is_identical(),
        shared: diff.shared,
        cluster,
        offline,
    }
}

#[derive(Clone, Copy)]
enum Side {
    Cluster,
    Offline,
}

fn side_summary(
    diff: &DiffResult,
    exclusive: &[Row],
    side: Side,
    limit: usize,
    source: Option<&LogTable>,
) -> SideSummary {
    let counts = match side {
        Side::Cluster => &diff.cluster,
        Side::Offline => &diff.offline,
    };
    let samples = exclusive
        .iter()
        .take(limit)
        .map(|key| Sample {
            key: key.clone(),
            full_rows: source.map(|table| matching_rows(table, &diff.fields, key)),
        })
        .collect();

    SideSummary {
        source_rows: counts.source_rows,
        projected_rows: counts.projected_rows,
        digest: counts.digest.clone(),
        exclusive: exclusive.len(),
        source_columns: source.map(|t| t.columns().to_vec()),
        samples,
    }
}

/// Source rows whose values at `fields` equal `key`, in file order.
fn matching_rows(table: &LogTable, fields: &[String], key: &[Value]) -> Vec<Row> {
    let indices: Option<Vec<usize>> = fields.iter().map(|f| table.column_index(f)).collect();
    let Some(indices) = indices else {
        return Vec::new();
    };
    table
        .rows()
        .iter()
        .filter(|row| indices.iter().zip(key).all(|(&i, k)| &row[i] == k))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::project::project;

    fn table(columns: &[&str], rows: &[&[&str]]) -> LogTable {
        LogTable::new(
            columns.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| Value::from_token(v, "-")).collect())
                .collect(),
        )
        .unwrap()
    }

    fn diff_of(a: &LogTable, b: &LogTable, fields: &[&str]) -> DiffResult {
        let fields: Vec<String> = fields.iter().map(|s| s.to_string()).collect();
        diff(
            "conn",
            &project(a, &fields).unwrap(),
            &project(b, &fields).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_samples_bounded_by_limit() {
        let a = table(&["x"], &[&["1"], &["2"], &["3"], &["4"]]);
        let b = table(&["x"], &[]);
        let d = diff_of(&a, &b, &["x"]);
        let options = ReportOptions {
            sample_limit: 2,
            full_rows: false,
        };
        let s = report_with("conn", &d, &options, None);
        assert_eq!(s.cluster.exclusive, 4);
        assert_eq!(s.cluster.samples.len(), 2);
        assert_eq!(s.cluster.samples[0].key, vec![Value::text("1")]);
        assert!(s.offline.samples.is_empty());
        assert!(!s.identical);
    }

    #[test]
    fn test_full_rows_attach_every_matching_source_row() {
        let a = table(
            &["ts", "x"],
            &[&["1.0", "a"], &["2.0", "a"], &["3.0", "b"]],
        );
        let b = table(&["ts", "x"], &[&["9.0", "b"]]);
        let d = diff_of(&a, &b, &["x"]);
        let options = ReportOptions {
            sample_limit: 5,
            full_rows: true,
        };
        let sources = SourceTables {
            cluster: &a,
            offline: &b,
        };
        let s = report_with("conn", &d, &options, Some(sources));
        let sample = &s.cluster.samples[0];
        assert_eq!(sample.key, vec![Value::text("a")]);
        assert_eq!(sample.full_rows.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            s.cluster.source_columns,
            Some(vec!["ts".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_full_rows_ignored_without_flag() {
        let a = table(&["x"], &[&["a"]]);
        let b = table(&["x"], &[]);
        let d = diff_of(&a, &b, &["x"]);
        let sources = SourceTables {
            cluster: &a,
            offline: &b,
        };
        let s = report_with("conn", &d, &ReportOptions::default(), Some(sources));
        assert!(s.cluster.samples[0].full_rows.is_none());
        assert!(s.cluster.source_columns.is_none());
    }

    #[test]
    fn test_json_omits_absent_full_rows() {
        let a = table(&["x"], &[&["a"]]);
        let d = diff_of(&a, &a, &["x"]);
        let json = serde_json::to_value(report("conn", &d)).unwrap();
        assert_eq!(json["identical"], true);
        assert_eq!(json["shared"], 1);
        assert!(json["cluster"].get("source_columns").is_none());
    }
}
