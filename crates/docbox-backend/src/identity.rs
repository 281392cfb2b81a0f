//! Identity surface of the hosted backend.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use docbox_core::result::AppResult;
use docbox_core::traits::{Account, Identity, SessionToken};

use crate::client::HostedBackend;

#[derive(Debug, Deserialize)]
struct EmailTokenResponse {
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(rename = "$id")]
    id: String,
    secret: String,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(rename = "$id")]
    id: String,
    email: String,
}

#[async_trait]
impl Identity for HostedBackend {
    async fn create_email_token(&self, email: &str) -> AppResult<String> {
        let response: EmailTokenResponse = self
            .send_json(
                self.request(Method::POST, "/account/tokens/email")
                    .json(&json!({ "email": email })),
                "create email token",
            )
            .await?;

        Ok(response.user_id)
    }

    async fn create_session(&self, account_id: &str, secret: &str) -> AppResult<SessionToken> {
        let response: SessionResponse = self
            .send_json(
                self.request(Method::POST, "/account/sessions/token")
                    .json(&json!({ "userId": account_id, "secret": secret })),
                "create session",
            )
            .await?;

        Ok(SessionToken {
            id: response.id,
            secret: response.secret,
        })
    }

    async fn get_account(&self) -> AppResult<Account> {
        let response: AccountResponse = self
            .send_json(self.request(Method::GET, "/account"), "get account")
            .await?;

        Ok(Account {
            id: response.id,
            email: response.email,
        })
    }

    async fn delete_session(&self) -> AppResult<()> {
        self.send_unit(
            self.request(Method::DELETE, "/account/sessions/current"),
            "delete session",
        )
        .await
    }
}
