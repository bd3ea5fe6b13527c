//! Integration tests for the log reader against captured Zeek logs
//!
//! Covers:
//! - header directives and rows of the conn fixture
//! - empty container placeholders kept as text
//! - malformed logs, missing files and directories
//! - scratch files written at test time

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{fixture, fixtures_dir};
use zeekdiff_core::errors::ExErrorKind;
use zeekdiff_core::{read_log, Value};

#[test]
fn test_read_conn_fixture() {
    // Given: a conn.log written by a cluster worker
    let table = fixture("cluster", "conn.log");

    // Then: the header and every data row are parsed
    assert_eq!(table.len(), 4);
    assert_eq!(table.columns().len(), 10);
    assert_eq!(table.header().path.as_deref(), Some("conn"));
    assert_eq!(table.header().separator, "\t");
    assert_eq!(table.header().open.as_deref(), Some("2024-05-01-10-00-00"));
    assert_eq!(table.column_type("id.orig_h"), Some("addr"));

    // And: unset fields are Null while the raw tokens are kept as text
    let service = table.column_index("service").unwrap();
    assert_eq!(table.rows()[3][service], Value::Null);
    assert_eq!(table.rows()[0][service], Value::text("http"));
}

#[test]
fn test_empty_container_placeholder_is_text() {
    let table = fixture("cluster", "dns.log");
    let answers = table.column_index("answers").unwrap();
    assert_eq!(table.rows()[1][answers], Value::text("(empty)"));
}

#[test]
fn test_missing_fields_directive_is_malformed() {
    // Given: a log with directives but no #fields line
    let path = fixtures_dir().join("malformed").join("no_fields.log");

    // When: we read it
    let err = read_log(&path).unwrap_err();

    // Then: the error is classified as malformed and names the file
    assert_eq!(err.kind(), ExErrorKind::MalformedLog);
    assert_eq!(err.code(), "ERR_MALFORMED_LOG");
    assert!(err.path().unwrap().ends_with("no_fields.log"));
}

#[test]
fn test_missing_file_is_not_found() {
    let err = read_log(&fixtures_dir().join("cluster").join("weird.log")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("read_log"));
}

#[test]
fn test_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_log(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_read_from_scratch_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x509.log");
    std::fs::write(&path, "#fields\tid\tsubject\nF1\tCN=a\nF2\t-\n").unwrap();

    let table = read_log(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.types(), None);
    assert_eq!(table.rows()[1][1], Value::Null);
}
