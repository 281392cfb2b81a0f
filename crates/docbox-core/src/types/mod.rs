//! Shared domain types.

pub mod file_kind;
pub mod query;

pub use file_kind::FileKind;
pub use query::{DocumentQuery, Filter, SortDirection, SortSpec};
