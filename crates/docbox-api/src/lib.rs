//! # docbox-api
//!
//! HTTP API layer for DocBox: the axum router, thin JSON handlers over the
//! service layer, request DTOs, the session-cookie extractors, and the
//! domain-error → HTTP-status mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
