//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for success responses.
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Account id returned by the sign-up / send-otp endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Backend account id to pass to verification.
    pub account_id: String,
}

/// Session id returned after OTP verification. The secret itself travels
/// only in the cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Backend session id.
    pub session_id: String,
}

/// Plain message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}
