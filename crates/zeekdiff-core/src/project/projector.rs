//! Projection of a [`LogTable`] onto a category's key fields.

use crate::core_types::schema::{SIDE_CLUSTER, SIDE_OFFLINE};
use crate::errors::{CompareError, ExError, ExErrorKind, Result};
use crate::model::{LogHeader, LogTable, Row, Value};
use crate::project::ordering::{FieldOrdering, LexicalOrdering, NaturalOrdering, OrderingKind};
use crate::{log_op_end, log_op_start};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// How configured key fields absent from a table are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStrategy {
    /// Every key field must be present in both tables
    Strict,
    /// Compare on whichever key fields are present (must be non-empty and
    /// identical on both sides)
    #[default]
    Intersection,
    /// Compare on the key fields both tables carry. A column present on one
    /// side only is left out of the comparison.
    Common,
}

/// A deduplicated, sorted table restricted to its effective fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedTable {
    fields: Vec<String>,
    rows: Vec<Row>,
    source_rows: usize,
}

impl ProjectedTable {
    /// Effective fields, in key-field order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Rows in sort order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row count of the table this projection was taken from
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    /// Hex SHA-256 over the field list and rows in order.
    ///
    /// Identical inputs always produce identical digests.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for field in &self.fields {
            hash_token(&mut hasher, field.as_bytes());
        }
        hasher.update([0x1du8]);
        for row in &self.rows {
            for value in row {
                match value {
                    Value::Null => hasher.update([0x00u8]),
                    Value::Text(s) => {
                        hasher.update([0x01u8]);
                        hash_token(&mut hasher, s.as_bytes());
                    }
                }
            }
            hasher.update([0x1eu8]);
        }
        hex::encode(hasher.finalize())
    }

    /// View this projection as a plain table over its effective fields.
    ///
    /// # Errors
    ///
    /// Never fails for a projection built by [`Projector`]; the checks of
    /// [`LogTable::new`] still apply.
    pub fn to_table(&self) -> Result<LogTable> {
        LogTable::with_header(
            LogHeader::default(),
            self.fields.clone(),
            None,
            self.rows.clone(),
        )
    }
}

fn hash_token(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Projects tables using a field strategy and per-field orderings.
///
/// Fields without an explicit ordering use [`NaturalOrdering`].
#[derive(Clone, Default)]
pub struct Projector {
    strategy: FieldStrategy,
    orderings: BTreeMap<String, Arc<dyn FieldOrdering>>,
}

impl fmt::Debug for Projector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orderings: BTreeMap<&str, &str> = self
            .orderings
            .iter()
            .map(|(k, v)| (k.as_str(), v.name()))
            .collect();
        f.debug_struct("Projector")
            .field("strategy", &self.strategy)
            .field("orderings", &orderings)
            .finish()
    }
}

impl Projector {
    pub fn new(strategy: FieldStrategy) -> Self {
        Self {
            strategy,
            orderings: BTreeMap::new(),
        }
    }

    /// Use a custom ordering for `field`.
    pub fn with_ordering(
        mut self,
        field: impl Into<String>,
        ordering: impl FieldOrdering + 'static,
    ) -> Self {
        self.orderings.insert(field.into(), Arc::new(ordering));
        self
    }

    /// Use one of the built-in orderings for `field`.
    pub fn with_ordering_kind(mut self, field: impl Into<String>, kind: OrderingKind) -> Self {
        let ordering: Arc<dyn FieldOrdering> = match kind {
            OrderingKind::Natural => Arc::new(NaturalOrdering),
            OrderingKind::Lexical => Arc::new(LexicalOrdering),
        };
        self.orderings.insert(field.into(), ordering);
        self
    }

    /// Apply a configured `field → kind` map.
    pub fn with_ordering_kinds<'a>(
        self,
        kinds: impl IntoIterator<Item = (&'a String, &'a OrderingKind)>,
    ) -> Self {
        kinds
            .into_iter()
            .fold(self, |p, (field, kind)| p.with_ordering_kind(field.clone(), *kind))
    }

    pub fn strategy(&self) -> FieldStrategy {
        self.strategy
    }

    /// `key_fields ∩ table.columns`, in key-field order, duplicates removed.
    pub fn select_fields(&self, table: &LogTable, key_fields: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        key_fields
            .iter()
            .filter(|f| table.has_column(f) && seen.insert(f.as_str()))
            .cloned()
            .collect()
    }

    /// Project one table.
    ///
    /// # Errors
    ///
    /// `NoComparableFields` when no key field is present, or, under
    /// [`FieldStrategy::Strict`], when any key field is missing.
    pub fn project(&self, table: &LogTable, key_fields: &[String]) -> Result<ProjectedTable> {
        let start = Instant::now();
        log_op_start!("project", source_rows = table.len());

        if self.strategy == FieldStrategy::Strict {
            let missing: Vec<String> = key_fields
                .iter()
                .filter(|f| !table.has_column(f))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(CompareError::KeyFieldsMissing { missing }.into());
            }
        }

        let fields = self.select_fields(table, key_fields);
        if fields.is_empty() {
            return Err(CompareError::NoKeyFieldsPresent {
                requested: key_fields.to_vec(),
            }
            .into());
        }

        let indices: Vec<usize> = fields
            .iter()
            .filter_map(|f| table.column_index(f))
            .collect();
        let orderings: Vec<&dyn FieldOrdering> = fields
            .iter()
            .map(|f| {
                self.orderings
                    .get(f)
                    .map(|o| o.as_ref())
                    .unwrap_or_else(|| OrderingKind::Natural.ordering())
            })
            .collect();

        let mut seen: HashSet<Row> = HashSet::new();
        let mut rows: Vec<Row> = Vec::new();
        for source in table.rows() {
            let row: Row = indices.iter().map(|&i| source[i].clone()).collect();
            if row.iter().all(Value::is_null) {
                continue;
            }
            if seen.insert(row.clone()) {
                rows.push(row);
            }
        }
        rows.sort_by(|a, b| compare_rows(a, b, &orderings));

        log_op_end!(
            "project",
            duration_ms = start.elapsed().as_millis() as u64,
            source_rows = table.len(),
            rows = rows.len()
        );

        Ok(ProjectedTable {
            fields,
            rows,
            source_rows: table.len(),
        })
    }

    /// Project both sides of a category and check they share a field list.
    ///
    /// Under the intersection strategy, one side having no key field at all
    /// while the other has some is a schema mismatch rather than a
    /// projection failure. Under [`FieldStrategy::Common`] the key fields are
    /// first narrowed to the columns of both tables.
    ///
    /// # Errors
    ///
    /// `NoComparableFields` or `SchemaMismatch`; failures raised by one side
    /// name that side in the message.
    pub fn project_pair(
        &self,
        cluster: &LogTable,
        offline: &LogTable,
        key_fields: &[String],
    ) -> Result<(ProjectedTable, ProjectedTable)> {
        if self.strategy == FieldStrategy::Common {
            return self.project_common(cluster, offline, key_fields);
        }

        let cluster = self
            .project(cluster, key_fields)
            .map_err(|e| with_side(e, SIDE_CLUSTER));
        let offline = self
            .project(offline, key_fields)
            .map_err(|e| with_side(e, SIDE_OFFLINE));

        let gap = |e: &ExError| {
            self.strategy == FieldStrategy::Intersection
                && e.kind() == ExErrorKind::NoComparableFields
        };

        match (cluster, offline) {
            (Ok(c), Ok(o)) => {
                reconcile_fields(&c, &o)?;
                Ok((c, o))
            }
            (Ok(c), Err(e)) if gap(&e) => Err(CompareError::SchemaMismatch {
                cluster: c.fields.clone(),
                offline: Vec::new(),
            }
            .into()),
            (Err(e), Ok(o)) if gap(&e) => Err(CompareError::SchemaMismatch {
                cluster: Vec::new(),
                offline: o.fields.clone(),
            }
            .into()),
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }

    fn project_common(
        &self,
        cluster: &LogTable,
        offline: &LogTable,
        key_fields: &[String],
    ) -> Result<(ProjectedTable, ProjectedTable)> {
        let common: Vec<String> = self
            .select_fields(cluster, key_fields)
            .into_iter()
            .filter(|f| offline.has_column(f))
            .collect();
        if common.is_empty() {
            let err: ExError = CompareError::NoKeyFieldsPresent {
                requested: key_fields.to_vec(),
            }
            .into();
            let message = format!("no key field shared by both sides: {}", err.message());
            return Err(err.with_message(message));
        }
        tracing::debug!(
            requested = key_fields.len(),
            common = common.len(),
            "narrowed key fields to common columns"
        );

        let c = self
            .project(cluster, &common)
            .map_err(|e| with_side(e, SIDE_CLUSTER))?;
        let o = self
            .project(offline, &common)
            .map_err(|e| with_side(e, SIDE_OFFLINE))?;
        Ok((c, o))
    }
}

fn with_side(err: ExError, side: &str) -> ExError {
    let message = format!("{} side: {}", side, err.message());
    err.with_message(message)
}

fn compare_rows(a: &Row, b: &Row, orderings: &[&dyn FieldOrdering]) -> Ordering {
    a.iter()
        .zip(b.iter())
        .zip(orderings.iter())
        .map(|((x, y), o)| o.compare(x, y))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Project with the intersection strategy and natural ordering.
///
/// # Errors
///
/// `NoComparableFields` when none of `key_fields` is a column of `table`.
pub fn project(table: &LogTable, key_fields: &[String]) -> Result<ProjectedTable> {
    Projector::default().project(table, key_fields)
}

/// Check that two projections share the same effective field list.
///
/// # Errors
///
/// `SchemaMismatch` naming both lists.
pub fn reconcile_fields(cluster: &ProjectedTable, offline: &ProjectedTable) -> Result<()> {
    if cluster.fields == offline.fields {
        Ok(())
    } else {
        Err(CompareError::SchemaMismatch {
            cluster: cluster.fields.clone(),
            offline: offline.fields.clone(),
        }
        .into())
    }
}
