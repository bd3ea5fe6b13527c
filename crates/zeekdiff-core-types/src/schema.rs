//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Comparison identifiers
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_PATH: &str = "path";

// Collection sizes
pub const FIELD_ROWS: &str = "rows";
pub const FIELD_COLUMNS: &str = "columns";
pub const FIELD_ONLY_CLUSTER: &str = "only_cluster";
pub const FIELD_ONLY_OFFLINE: &str = "only_offline";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Side labels
pub const SIDE_CLUSTER: &str = "cluster";
pub const SIDE_OFFLINE: &str = "offline";
