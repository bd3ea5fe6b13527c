//! In-memory representation of a parsed tagged tabular log.

pub mod table;
pub mod value;

pub use table::{LogHeader, LogTable, Row};
pub use value::Value;
