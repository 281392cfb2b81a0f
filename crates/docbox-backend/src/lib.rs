//! # docbox-backend
//!
//! Implementations of the [`docbox_core::traits`] capability surfaces:
//!
//! - [`client::HostedBackendFactory`] — reqwest client for the hosted
//!   backend-as-a-service REST API, producing elevated (API-key) and
//!   user-scoped (session-token) handles.
//! - [`memory::MemoryBackend`] — complete in-memory backend for tests and
//!   local development.

pub mod blobs;
pub mod client;
pub mod documents;
pub mod identity;
pub mod memory;
pub mod query;

pub use client::HostedBackendFactory;
pub use memory::MemoryBackend;
