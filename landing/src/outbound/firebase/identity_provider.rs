//! Reqwest-backed Firebase Auth adapter.
//!
//! Owns transport only: request encoding, timeout and status handling, and
//! translating Identity Toolkit error codes into port errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{AuthResponseDto, PasswordRequestDto};
use super::{endpoint, error_message};
use crate::domain::ports::{CreatedAccount, IdentityProvider, IdentityProviderError};
use crate::domain::{Credentials, SessionToken, UserId};

const SIGN_UP_ACTION: &str = "accounts:signUp";
const SIGN_IN_ACTION: &str = "accounts:signInWithPassword";

/// Identity provider talking to the Identity Toolkit REST API.
pub struct FirebaseIdentityProvider {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl FirebaseIdentityProvider {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    async fn post_password(
        &self,
        action: &str,
        credentials: &Credentials,
    ) -> Result<AuthResponseDto, IdentityProviderError> {
        let url = endpoint(&self.base_url, &[action]).map_err(IdentityProviderError::rejected)?;
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&PasswordRequestDto::from_credentials(credentials))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            debug!(action, status = status.as_u16(), %error, "identity toolkit refused request");
            return Err(error);
        }

        serde_json::from_slice(body.as_ref()).map_err(|err| {
            IdentityProviderError::rejected(format!("invalid Identity Toolkit response: {err}"))
        })
    }
}

/// Session for the account in `response`. Both actions ask for a secure
/// token, so an empty `idToken` is a protocol violation.
fn session_from(response: AuthResponseDto) -> Result<SessionToken, IdentityProviderError> {
    let user_id = UserId::new(response.local_id.as_str()).map_err(|err| {
        IdentityProviderError::rejected(format!("identity toolkit returned bad localId: {err}"))
    })?;
    if response.id_token.is_empty() {
        return Err(IdentityProviderError::rejected(
            "identity toolkit returned no idToken",
        ));
    }
    Ok(SessionToken::new(user_id, response.id_token))
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn create_account(
        &self,
        credentials: &Credentials,
    ) -> Result<CreatedAccount, IdentityProviderError> {
        let response = self.post_password(SIGN_UP_ACTION, credentials).await?;
        Ok(CreatedAccount {
            session: session_from(response)?,
        })
    }

    async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<SessionToken, IdentityProviderError> {
        let response = self.post_password(SIGN_IN_ACTION, credentials).await?;
        session_from(response)
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::unreachable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    if status.is_server_error() {
        return IdentityProviderError::unreachable(format!(
            "status {}: {}",
            status.as_u16(),
            error_message(body)
        ));
    }
    map_error_code(error_message(body))
}

/// Map an Identity Toolkit error code such as `WEAK_PASSWORD : Password
/// should be at least 6 characters` onto a port error.
fn map_error_code(message: String) -> IdentityProviderError {
    let code = message
        .split_once(" : ")
        .map_or(message.as_str(), |(code, _)| code)
        .trim();
    match code {
        "EMAIL_EXISTS" => IdentityProviderError::email_already_registered(message),
        "INVALID_EMAIL" | "MISSING_EMAIL" => IdentityProviderError::malformed_email(message),
        "WEAK_PASSWORD" | "MISSING_PASSWORD" => IdentityProviderError::weak_password(message),
        "EMAIL_NOT_FOUND" => IdentityProviderError::unknown_email(message),
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            IdentityProviderError::wrong_password(message)
        }
        "USER_DISABLED" => IdentityProviderError::account_disabled(message),
        _ => IdentityProviderError::rejected(message),
    }
}
