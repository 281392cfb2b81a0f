//! # docbox-core
//!
//! Core crate for DocBox. Contains the capability traits for the hosted
//! backend (identity, documents, blobs), configuration schemas, shared
//! types (file classification, query model), and the unified error system.
//!
//! This crate has **no** internal dependencies on other DocBox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
