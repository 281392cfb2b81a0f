//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docbox_core::error::AppError;
use docbox_core::traits::Document;

/// Attribute names of the users collection.
pub mod attrs {
    /// Display name attribute.
    pub const FULL_NAME: &str = "fullName";
    /// Email attribute.
    pub const EMAIL: &str = "email";
    /// Backend account id attribute.
    pub const ACCOUNT_ID: &str = "accountId";
    /// Avatar URL attribute.
    pub const AVATAR: &str = "avatar";
}

/// Avatar assigned to newly created users.
pub const DEFAULT_AVATAR: &str = "/images/avatar.png";

/// A registered DocBox user.
///
/// Created on first OTP request when no user matches the email; immutable
/// afterwards except through profile editing, which is out of scope here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document id.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Email address the OTP codes go to.
    pub email: String,
    /// Backend account id this user document belongs to.
    pub account_id: String,
    /// Avatar URL.
    pub avatar: String,
    /// When the user document was created.
    pub created_at: DateTime<Utc>,
    /// When the user document was last updated.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserAttrs {
    full_name: String,
    email: String,
    account_id: String,
    #[serde(default)]
    avatar: String,
}

impl User {
    /// Decode a backend document into a `User`.
    pub fn from_document(doc: &Document) -> Result<Self, AppError> {
        let attrs: UserAttrs = serde_json::from_value(doc.data.clone())?;

        Ok(Self {
            id: doc.id.clone(),
            full_name: attrs.full_name,
            email: attrs.email,
            account_id: attrs.account_id,
            avatar: attrs.avatar,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }

    /// Attribute payload for creating a fresh user document.
    pub fn create_payload(full_name: &str, email: &str, account_id: &str) -> serde_json::Value {
        serde_json::json!({
            attrs::FULL_NAME: full_name,
            attrs::EMAIL: email,
            attrs::ACCOUNT_ID: account_id,
            attrs::AVATAR: DEFAULT_AVATAR,
        })
    }
}
