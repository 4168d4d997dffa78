//! Driven port for the external identity provider.
//!
//! The provider owns account identities; the core only asks it to create one
//! or to verify credentials. Transport and wire formats stay in the adapter.

use async_trait::async_trait;

use crate::domain::{Credentials, SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures reported by identity provider adapters.
    pub enum IdentityProviderError {
        /// The email address is not syntactically valid.
        MalformedEmail { message: String } => "invalid email address: {message}",
        /// The password does not meet the provider's strength rules.
        WeakPassword { message: String } => "password is too weak: {message}",
        /// An account already exists for this email.
        EmailAlreadyRegistered { message: String } =>
            "email address is already in use: {message}",
        /// No account exists for this email.
        UnknownEmail { message: String } => "no account found: {message}",
        /// The password does not match the account.
        WrongPassword { message: String } => "wrong password: {message}",
        /// The account exists but has been disabled.
        AccountDisabled { message: String } => "account disabled: {message}",
        /// The provider could not be reached or failed internally.
        Unreachable { message: String } => "identity provider unreachable: {message}",
        /// Any other refusal the adapter could not classify.
        Rejected { message: String } => "identity provider rejected the request: {message}",
    }
}

/// Result of a successful account creation.
///
/// The new account comes back signed in; its session authorises the profile
/// write that follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAccount {
    /// Session of the new account.
    pub session: SessionToken,
}

impl CreatedAccount {
    /// Identifier of the new account.
    pub fn user_id(&self) -> &UserId {
        self.session.user_id()
    }
}

/// Identity provider capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account identity for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns the provider's classification of the refusal, or
    /// [`IdentityProviderError::Unreachable`] when it could not be asked.
    async fn create_account(
        &self,
        credentials: &Credentials,
    ) -> Result<CreatedAccount, IdentityProviderError>;

    /// Verify credentials and open a session.
    ///
    /// # Errors
    ///
    /// Returns the provider's classification of the refusal, or
    /// [`IdentityProviderError::Unreachable`] when it could not be asked.
    async fn sign_in(&self, credentials: &Credentials)
    -> Result<SessionToken, IdentityProviderError>;
}
