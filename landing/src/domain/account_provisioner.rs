//! Two-phase account provisioning and sign-in.
//!
//! Registration first creates the identity, then writes the profile record.
//! The two systems share no transaction and nothing is rolled back: when the
//! second phase fails the identity stays behind and the error names it.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{DocumentStore, IdentityProvider};
use crate::domain::{
    AuthError, Credentials, ProfileRecord, ProfileTemplate, ProvisionError, SessionToken,
};

/// Creates accounts and signs users in against the injected capabilities.
#[derive(Clone)]
pub struct AccountProvisioner<I, D> {
    identity: Arc<I>,
    store: Arc<D>,
    clock: Arc<dyn Clock>,
    template: ProfileTemplate,
}

impl<I, D> AccountProvisioner<I, D> {
    /// Create a provisioner writing profiles with the default template.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use landing::domain::AccountProvisioner;
    /// # use landing::outbound::memory::{InMemoryDocumentStore, InMemoryIdentityProvider};
    /// # use mockable::DefaultClock;
    /// let provisioner = AccountProvisioner::new(
    ///     Arc::new(InMemoryIdentityProvider::default()),
    ///     Arc::new(InMemoryDocumentStore::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(identity: Arc<I>, store: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            identity,
            store,
            clock,
            template: ProfileTemplate::default(),
        }
    }

    /// Override the collection and placeholder username for new profiles.
    #[must_use]
    pub fn with_template(mut self, template: ProfileTemplate) -> Self {
        self.template = template;
        self
    }
}

impl<I, D> AccountProvisioner<I, D>
where
    I: IdentityProvider,
    D: DocumentStore,
{
    /// Create the identity, then write its profile record as the new account.
    ///
    /// # Errors
    ///
    /// [`ProvisionError::IdentityCreation`] when the provider refuses the
    /// account; no profile write is attempted. [`ProvisionError::ProfileWrite`]
    /// when the store write fails after the identity was created; the
    /// identity is not deleted.
    pub async fn register_account(
        &self,
        credentials: &Credentials,
    ) -> Result<ProfileRecord, ProvisionError> {
        let account = self
            .identity
            .create_account(credentials)
            .await
            .map_err(ProvisionError::IdentityCreation)?;

        let user_id = account.user_id();
        let record = ProfileRecord::new_default(
            &self.template,
            user_id.clone(),
            credentials.email(),
            self.clock.utc(),
        );

        if let Err(source) = self
            .store
            .put(&account.session, &self.template.collection, user_id, &record)
            .await
        {
            warn!(
                user_id = %user_id,
                error = %source,
                "profile write failed; identity left without a profile"
            );
            return Err(ProvisionError::ProfileWrite {
                orphaned_user_id: user_id.clone(),
                source,
            });
        }

        info!(user_id = %record.id(), "account provisioned");
        Ok(record)
    }

    /// Verify credentials with the identity provider. No retry.
    ///
    /// # Errors
    ///
    /// [`AuthError`] for every failure cause; the cause is only logged.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SessionToken, AuthError> {
        match self.identity.sign_in(credentials).await {
            Ok(token) => {
                info!(user_id = %token.user_id(), "signed in");
                Ok(token)
            }
            Err(cause) => {
                debug!(error = %cause, "sign-in rejected by identity provider");
                Err(AuthError::new())
            }
        }
    }
}
