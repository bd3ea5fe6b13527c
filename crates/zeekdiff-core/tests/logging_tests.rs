//! Structured log events emitted by the comparison operations
//!
//! Covers:
//! - the log_op_* macros
//! - read_log start and end events with row and column counts
//! - read_log error events carrying the error code
//! - diff end events with exclusive counts

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{fields, fixtures_dir};
use zeekdiff_core::errors::{ExError, ExErrorKind};
use zeekdiff_core::logging_facility::test_capture::init_test_capture;
use zeekdiff_core::{diff, log_op_end, log_op_error, log_op_start, project, read_log};
use zeekdiff_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CATEGORY, FIELD_COLUMNS, FIELD_DURATION_MS,
    FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_EVENT, FIELD_ONLY_CLUSTER, FIELD_ONLY_OFFLINE, FIELD_PATH,
    FIELD_ROWS,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_zeekdiff_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_zeekdiff_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_where(op_name, FIELD_EVENT, EVENT_END);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].fields.get(FIELD_DURATION_MS), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_zeekdiff_3";

    let err = ExError::new(ExErrorKind::SchemaMismatch);
    log_op_error!(op_name, err, duration_ms = 1);

    let events = capture.events_where(op_name, FIELD_EVENT, EVENT_END_ERROR);
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_SCHEMA_MISMATCH".to_string())
    );
    assert_eq!(
        events[0].fields.get(FIELD_ERR_KIND),
        Some(&"SchemaMismatch".to_string())
    );
}

#[test]
fn test_read_log_emits_row_counts() {
    let capture = init_test_capture();
    let path = fixtures_dir().join("offline").join("http.log");

    read_log(&path).unwrap();

    let display = path.display().to_string();
    let ends = capture.events_where("read_log", FIELD_PATH, &display);
    let end = ends
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .expect("end event for this path");
    assert_eq!(end.fields.get(FIELD_ROWS), Some(&"2".to_string()));
    assert_eq!(end.fields.get(FIELD_COLUMNS), Some(&"7".to_string()));
}

#[test]
fn test_read_log_failure_emits_error_event() {
    let capture = init_test_capture();
    let path = fixtures_dir().join("malformed").join("no_fields.log");

    read_log(&path).unwrap_err();

    let display = path.display().to_string();
    let errors: Vec<_> = capture
        .events_where("read_log", FIELD_PATH, &display)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_MALFORMED_LOG".to_string())
    );
}

#[test]
fn test_diff_emits_exclusive_counts() {
    let capture = init_test_capture();
    let table = read_log(&fixtures_dir().join("cluster").join("http.log")).unwrap();
    let p = project(&table, &fields(&["host", "uri"])).unwrap();

    diff("logging_test_diff_category", &p, &p).unwrap();

    let events = capture.events_where("diff", FIELD_CATEGORY, "logging_test_diff_category");
    let end = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert_eq!(end.fields.get(FIELD_ONLY_CLUSTER), Some(&"0".to_string()));
    assert_eq!(end.fields.get(FIELD_ONLY_OFFLINE), Some(&"0".to_string()));
    assert_eq!(end.fields.get("shared"), Some(&"2".to_string()));
}
