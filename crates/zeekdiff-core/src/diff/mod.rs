//! Set difference of two projected tables.
//!
//! Rows are compared by value only: every field textually equal, with
//! `Null == Null`. Row order and duplicates in the inputs never affect the
//! result.
//!
//! ```ignore
//! use zeekdiff_core::{diff, project};
//!
//! let a = project(&cluster_table, &fields)?;
//! let b = project(&offline_table, &fields)?;
//! let result = diff("ssl", &a, &b)?;
//! assert_eq!(result.shared + result.only_cluster.len(), a.len());
//! ```

pub mod engine;
pub mod model;

pub use engine::diff;
pub use model::{DiffResult, SideCounts};
