use serde::Serialize;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing and the machine-readable run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExErrorKind {
    // Input
    /// Input log file does not exist
    NotFound,
    /// Log file has no `#fields` directive or an inconsistent header
    MalformedLog,

    // Projection / comparison
    /// None (or, under the strict strategy, not all) of the configured key
    /// fields are present in a table
    NoComparableFields,
    /// The effective field lists of the two sides differ
    SchemaMismatch,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MalformedLog => "ERR_MALFORMED_LOG",
            ExErrorKind::NoComparableFields => "ERR_NO_COMPARABLE_FIELDS",
            ExErrorKind::SchemaMismatch => "ERR_SCHEMA_MISMATCH",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind only invalidates the category it was
    /// raised for. Configuration errors are the only kind fatal to a run.
    pub fn is_category_scoped(&self) -> bool {
        !matches!(self, ExErrorKind::InvalidConfig)
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context (operation,
/// category, file) for the skip report.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    category: Option<String>,
    path: Option<String>,
    fields: Option<Vec<String>>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            category: None,
            path: None,
            fields: None,
            message: String::new(),
        }
    }

    /// Set the operation name
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the log category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the category only if none is recorded yet
    pub fn or_category(self, category: &str) -> Self {
        if self.category.is_some() {
            self
        } else {
            self.with_category(category)
        }
    }

    /// Set the file path the error relates to
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the field names involved (missing key fields, mismatched lists)
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Set the error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(category) = &self.category {
            write!(f, " (category: {})", category)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised while reading, projecting and diffing logs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    // ===== Input Errors =====
    #[error("Log file not found: {path}")]
    LogNotFound { path: String },

    #[error("Failed to read log file {path}: {reason}")]
    LogUnreadable { path: String, reason: String },

    #[error("No #fields directive in {path}")]
    MissingFieldsDirective { path: String },

    #[error("Malformed header in {path} at line {line}: {reason}")]
    MalformedHeader {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Duplicate column {column} declared in {path}")]
    DuplicateColumn { path: String, column: String },

    // ===== Projection Errors =====
    #[error("None of the key fields {requested:?} are present")]
    NoKeyFieldsPresent { requested: Vec<String> },

    #[error("Key fields missing under strict schema: {missing:?}")]
    KeyFieldsMissing { missing: Vec<String> },

    #[error("Category {category} is not configured")]
    UnknownCategory { category: String },

    #[error("Effective fields differ: cluster={cluster:?}, offline={offline:?}")]
    SchemaMismatch {
        cluster: Vec<String>,
        offline: Vec<String>,
    },

    // ===== Internal Errors =====
    #[error("Row {row} has {actual} values but table has {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl From<CompareError> for ExError {
    fn from(err: CompareError) -> Self {
        let message = err.to_string();
        match err {
            CompareError::LogNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_op("read_log")
                .with_path(path)
                .with_message(message),

            CompareError::LogUnreadable { path, .. } => ExError::new(ExErrorKind::Io)
                .with_op("read_log")
                .with_path(path)
                .with_message(message),

            CompareError::MissingFieldsDirective { path }
            | CompareError::MalformedHeader { path, .. }
            | CompareError::DuplicateColumn { path, .. } => {
                ExError::new(ExErrorKind::MalformedLog)
                    .with_op("read_log")
                    .with_path(path)
                    .with_message(message)
            }

            CompareError::NoKeyFieldsPresent { requested } => {
                ExError::new(ExErrorKind::NoComparableFields)
                    .with_op("project")
                    .with_fields(requested)
                    .with_message(message)
            }

            CompareError::KeyFieldsMissing { missing } => {
                ExError::new(ExErrorKind::NoComparableFields)
                    .with_op("project")
                    .with_fields(missing)
                    .with_message(message)
            }

            CompareError::UnknownCategory { category } => {
                ExError::new(ExErrorKind::NoComparableFields)
                    .with_op("compare_category")
                    .with_category(category)
                    .with_message(message)
            }

            CompareError::SchemaMismatch { cluster, offline } => {
                let mut fields = cluster;
                for field in offline {
                    if !fields.contains(&field) {
                        fields.push(field);
                    }
                }
                ExError::new(ExErrorKind::SchemaMismatch)
                    .with_op("reconcile_fields")
                    .with_fields(fields)
                    .with_message(message)
            }

            CompareError::RowWidth { .. } => ExError::new(ExErrorKind::Internal)
                .with_op("log_table")
                .with_message(message),
        }
    }
}
