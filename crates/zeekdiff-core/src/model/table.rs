//! `LogTable`: named columns plus fixed-width rows.

use crate::errors::{CompareError, Result};
use crate::model::value::{Value, DEFAULT_EMPTY_FIELD, DEFAULT_UNSET_FIELD};
use serde::Serialize;
use std::collections::HashSet;

/// One record; always exactly as wide as its table's column list.
pub type Row = Vec<Value>;

/// Metadata carried by the `#` directive lines of a log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogHeader {
    /// Field separator (`#separator`, written as `\xHH` escapes)
    pub separator: String,
    /// Separator between elements of set/vector fields
    pub set_separator: String,
    /// Placeholder for an empty container
    pub empty_field: String,
    /// Placeholder for an unset field
    pub unset_field: String,
    /// Log stream name (`#path`), e.g. `conn`
    pub path: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
}

impl Default for LogHeader {
    fn default() -> Self {
        Self {
            separator: "\t".to_string(),
            set_separator: ",".to_string(),
            empty_field: DEFAULT_EMPTY_FIELD.to_string(),
            unset_field: DEFAULT_UNSET_FIELD.to_string(),
            path: None,
            open: None,
            close: None,
        }
    }
}

/// A parsed log: ordered unique columns and rows aligned to them.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct LogTable {
    header: LogHeader,
    columns: Vec<String>,
    types: Option<Vec<String>>,
    rows: Vec<Row>,
}

impl LogTable {
    /// Build a table, checking column uniqueness and row width.
    ///
    /// # Errors
    ///
    /// - `MalformedLog` if a column name repeats
    /// - `Internal` if any row is not exactly `columns.len()` wide
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        Self::with_header(LogHeader::default(), columns, None, rows)
    }

    /// Build a table with explicit header metadata and column types.
    ///
    /// # Errors
    ///
    /// As [`LogTable::new`], plus `MalformedLog` if `types` is present with a
    /// different length than `columns`.
    pub fn with_header(
        header: LogHeader,
        columns: Vec<String>,
        types: Option<Vec<String>>,
        rows: Vec<Row>,
    ) -> Result<Self> {
        let origin = header.path.clone().unwrap_or_default();
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(CompareError::DuplicateColumn {
                    path: origin,
                    column: column.clone(),
                }
                .into());
            }
        }
        if let Some(types) = &types {
            if types.len() != columns.len() {
                return Err(CompareError::MalformedHeader {
                    path: origin,
                    line: 0,
                    reason: format!(
                        "{} types declared for {} fields",
                        types.len(),
                        columns.len()
                    ),
                }
                .into());
            }
        }
        if let Some((row, actual)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
            .map(|(i, r)| (i, r.len()))
        {
            return Err(CompareError::RowWidth {
                row,
                expected: columns.len(),
                actual,
            }
            .into());
        }
        Ok(Self {
            header,
            columns,
            types,
            rows,
        })
    }

    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn types(&self) -> Option<&[String]> {
        self.types.as_deref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Declared type of a column (`#types`), e.g. `addr`, `count`
    pub fn column_type(&self, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.types.as_ref().map(|t| t[idx].as_str())
    }
}
