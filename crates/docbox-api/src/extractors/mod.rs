//! Request extractors.

pub mod session;

pub use session::{CurrentUser, SESSION_COOKIE, SessionSecret};
