//! Account flows and session resolution.

pub mod service;

pub use service::UserService;
