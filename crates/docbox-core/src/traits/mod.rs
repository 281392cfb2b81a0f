//! Capability traits for the hosted backend.
//!
//! The backend SDK's layered `account`/`databases`/`storage` surfaces are
//! re-expressed as three narrow traits — [`Identity`], [`DocumentStore`],
//! and [`BlobStore`] — bundled per privilege level by [`BackendHandles`]
//! and produced by a [`BackendFactory`]. Any compliant backend (or an
//! in-memory fake for tests) can be substituted behind them.

pub mod backend;
pub mod blobs;
pub mod documents;
pub mod identity;
pub mod revalidate;

pub use backend::{BackendFactory, BackendHandles};
pub use blobs::{BlobObject, BlobStore};
pub use documents::{Document, DocumentList, DocumentStore};
pub use identity::{Account, Identity, SessionToken};
pub use revalidate::PathRevalidator;
