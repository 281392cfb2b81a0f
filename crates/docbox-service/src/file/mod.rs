//! File operations and the file query builder.

pub mod query;
pub mod service;

pub use query::build_file_query;
pub use service::{FileService, ListFilesParams, UploadParams};
