//! Differ implementation.

use crate::diff::model::{DiffResult, SideCounts};
use crate::errors::Result;
use crate::model::Row;
use crate::project::{reconcile_fields, ProjectedTable};
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::HashSet;
use std::time::Instant;

/// Diff two projections of the same category.
///
/// # Errors
///
/// `SchemaMismatch` when the effective field lists differ.
pub fn diff(
    category: &str,
    cluster: &ProjectedTable,
    offline: &ProjectedTable,
) -> Result<DiffResult> {
    let start = Instant::now();
    log_op_start!("diff", category = category);

    if let Err(err) = reconcile_fields(cluster, offline) {
        let err = err.with_category(category);
        log_op_error!(
            "diff",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            category = category
        );
        return Err(err);
    }

    let cluster_set: HashSet<&Row> = cluster.rows().iter().collect();
    let offline_set: HashSet<&Row> = offline.rows().iter().collect();

    let only_cluster = exclusive(cluster, &offline_set);
    let only_offline = exclusive(offline, &cluster_set);
    let shared = cluster.len() - only_cluster.len();

    log_op_end!(
        "diff",
        duration_ms = start.elapsed().as_millis() as u64,
        category = category,
        shared = shared,
        only_cluster = only_cluster.len(),
        only_offline = only_offline.len()
    );

    Ok(DiffResult {
        category: category.to_string(),
        fields: cluster.fields().to_vec(),
        cluster: side_counts(cluster),
        offline: side_counts(offline),
        shared,
        only_cluster,
        only_offline,
    })
}

fn exclusive(side: &ProjectedTable, other: &HashSet<&Row>) -> Vec<Row> {
    side.rows()
        .iter()
        .filter(|row| !other.contains(row))
        .cloned()
        .collect()
}

fn side_counts(side: &ProjectedTable) -> SideCounts {
    SideCounts {
        source_rows: side.source_rows(),
        projected_rows: side.len(),
        digest: side.digest(),
    }
}
