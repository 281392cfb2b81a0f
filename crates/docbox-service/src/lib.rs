//! # docbox-service
//!
//! Business logic services for DocBox. Each service is constructed once at
//! startup over a [`docbox_core::traits::BackendFactory`] and owns one area:
//! account flows and session resolution ([`user::UserService`]), file
//! operations ([`file::FileService`]), and storage usage aggregation
//! ([`usage::UsageService`]). The [`saga`] module provides the
//! compensating-transaction primitive used by multi-step writes.

pub mod file;
pub mod saga;
pub mod usage;
pub mod user;

#[cfg(test)]
pub(crate) mod testutil;
