//! Structured logging for zeekdiff
//!
//! Operations report themselves through `log_op_start!`, `log_op_end!` and
//! `log_op_error!`, using the field names in `core_types::schema`. The
//! binaries call [`init`] once; tests install the capture layer from
//! [`test_capture`] instead.
//!
//! Events are written to stderr so that report output on stdout stays clean.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
