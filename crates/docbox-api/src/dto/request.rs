//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Display name for the new user.
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    /// Email the one-time code goes to.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

/// Sign-in / resend-code request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Email the one-time code goes to.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

/// OTP verification request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// Account id returned by sign-up / send-otp.
    #[validate(length(min = 1, message = "Account id is required"))]
    pub account_id: String,
    /// The emailed one-time code.
    #[validate(length(min = 1, message = "Code is required"))]
    pub otp: String,
}

/// File rename request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFileRequest {
    /// New base name, without extension.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Extension appended to the new name (the stored extension attribute
    /// is not recomputed).
    pub extension: String,
    /// View path to revalidate.
    #[serde(default = "default_path")]
    pub path: String,
}

/// Share-list replacement request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFileUsersRequest {
    /// The full desired shared-access list; replaces the stored one.
    pub emails: Vec<String>,
    /// View path to revalidate.
    #[serde(default = "default_path")]
    pub path: String,
}

/// File delete request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteFileRequest {
    /// Blob id referenced by the metadata document.
    #[validate(length(min = 1, message = "Bucket file id is required"))]
    pub bucket_file_id: String,
    /// View path to revalidate.
    #[serde(default = "default_path")]
    pub path: String,
}

/// Query parameters of the file listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFilesQuery {
    /// Comma-separated content categories.
    #[serde(rename = "type")]
    pub types: Option<String>,
    /// Name-substring search text.
    pub search: Option<String>,
    /// Sort key, `"field-asc"` / `"field-desc"`.
    pub sort: Option<String>,
    /// Result cap.
    pub limit: Option<u32>,
}

fn default_path() -> String {
    "/".to_string()
}
