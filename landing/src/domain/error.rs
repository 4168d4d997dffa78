//! Outcome errors of the provisioning and sign-in operations.
//!
//! Registration errors keep the provider's message so the user sees it
//! verbatim. Sign-in errors are opaque: callers learn only that sign-in
//! failed.

use thiserror::Error;

use crate::domain::UserId;
use crate::domain::ports::{DocumentStoreError, IdentityProviderError};

/// Why `register_account` failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    /// The identity provider refused to create the account. Nothing was
    /// written.
    #[error(transparent)]
    IdentityCreation(IdentityProviderError),
    /// The account identity exists but its profile record was not written.
    ///
    /// The identity is left in place; `orphaned_user_id` names it so a
    /// reconciliation sweep can find it later.
    #[error("{source}")]
    ProfileWrite {
        /// Account created in the first phase that now has no profile.
        orphaned_user_id: UserId,
        /// Store failure.
        source: DocumentStoreError,
    },
}

impl ProvisionError {
    /// The identity left without a profile, if this was a partial failure.
    pub fn orphaned_user_id(&self) -> Option<&UserId> {
        match self {
            Self::IdentityCreation(_) => None,
            Self::ProfileWrite {
                orphaned_user_id, ..
            } => Some(orphaned_user_id),
        }
    }
}

/// Sign-in failed. Carries no cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("sign-in failed")]
pub struct AuthError {
    _private: (),
}

impl AuthError {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}
