//! Differ output types.

use crate::model::Row;
use serde::Serialize;

/// Row counts and digest for one side of a comparison.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SideCounts {
    /// Rows in the source log
    pub source_rows: usize,
    /// Distinct non-null projected rows
    pub projected_rows: usize,
    /// Digest of the projected table
    pub digest: String,
}

/// Result of diffing one category.
///
/// `cluster.projected_rows == shared + only_cluster.len()` and likewise for
/// the offline side.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiffResult {
    pub category: String,
    /// Effective fields shared by both projections
    pub fields: Vec<String>,
    pub cluster: SideCounts,
    pub offline: SideCounts,
    /// Rows present on both sides
    pub shared: usize,
    /// Rows only seen by the cluster, in projection order
    pub only_cluster: Vec<Row>,
    /// Rows only seen offline, in projection order
    pub only_offline: Vec<Row>,
}

impl DiffResult {
    /// True when neither side has rows the other lacks
    pub fn is_identical(&self) -> bool {
        self.only_cluster.is_empty() && self.only_offline.is_empty()
    }
}
