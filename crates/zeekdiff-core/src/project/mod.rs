//! Field projection: restrict a table to a category's key fields, drop
//! all-null rows, collapse duplicates and sort deterministically.

pub mod ordering;
pub mod projector;

pub use ordering::{FieldOrdering, LexicalOrdering, NaturalOrdering, OrderingKind};
pub use projector::{project, reconcile_fields, FieldStrategy, ProjectedTable, Projector};
