//! # docbox-entity
//!
//! Typed domain models decoded from (and encoded into) the hosted backend's
//! schemaless documents: users, file-metadata documents, and the storage
//! usage summary.

pub mod file;
pub mod usage;
pub mod user;

pub use file::{FileDoc, NewFileDoc};
pub use usage::{KindUsage, TotalSpace};
pub use user::User;
