//! In-memory identity provider and document store.
//!
//! Used by integration tests and local runs. Both adapters count calls and
//! accept injected failures so partial-failure paths can be driven without a
//! network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{
    CreatedAccount, DocumentStore, DocumentStoreError, IdentityProvider, IdentityProviderError,
};
use crate::domain::{Credentials, ProfileRecord, SessionToken, UserId};

/// Shortest password the in-memory provider accepts, matching common hosted
/// identity providers.
pub const MIN_PASSWORD_CHARS: usize = 6;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Account {
    user_id: UserId,
    password: Zeroizing<String>,
    disabled: bool,
}

/// Identity provider keeping accounts in a map keyed by email.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    unreachable: AtomicBool,
    create_calls: AtomicUsize,
    sign_in_calls: AtomicUsize,
}

impl InMemoryIdentityProvider {
    /// Make every subsequent call fail as if the provider were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Disable the account for `email`. Returns whether it existed.
    pub fn disable(&self, email: &str) -> bool {
        lock(&self.accounts)
            .get_mut(email)
            .map(|account| account.disabled = true)
            .is_some()
    }

    /// Account id registered for `email`, if any.
    pub fn user_id_for(&self, email: &str) -> Option<UserId> {
        lock(&self.accounts)
            .get(email)
            .map(|account| account.user_id.clone())
    }

    /// Number of accounts held.
    pub fn account_count(&self) -> usize {
        lock(&self.accounts).len()
    }

    /// Number of `create_account` calls received, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `sign_in` calls received, including failed ones.
    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    fn ensure_reachable(&self) -> Result<(), IdentityProviderError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(IdentityProviderError::unreachable(
                "in-memory provider marked unreachable",
            ));
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), IdentityProviderError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(IdentityProviderError::malformed_email(format!(
            "`{email}` is not an email address"
        ))),
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_account(
        &self,
        credentials: &Credentials,
    ) -> Result<CreatedAccount, IdentityProviderError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_reachable()?;
        validate_email(credentials.email())?;
        if credentials.password().chars().count() < MIN_PASSWORD_CHARS {
            return Err(IdentityProviderError::weak_password(format!(
                "password should be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        let mut accounts = lock(&self.accounts);
        if accounts.contains_key(credentials.email()) {
            return Err(IdentityProviderError::email_already_registered(
                credentials.email(),
            ));
        }
        let user_id = UserId::new(Uuid::new_v4().simple().to_string())
            .map_err(|err| IdentityProviderError::rejected(err.to_string()))?;
        accounts.insert(
            credentials.email().to_owned(),
            Account {
                user_id: user_id.clone(),
                password: Zeroizing::new(credentials.password().to_owned()),
                disabled: false,
            },
        );
        Ok(CreatedAccount {
            session: SessionToken::new(user_id, Uuid::new_v4().to_string()),
        })
    }

    async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<SessionToken, IdentityProviderError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_reachable()?;

        let accounts = lock(&self.accounts);
        let account = accounts
            .get(credentials.email())
            .ok_or_else(|| IdentityProviderError::unknown_email(credentials.email()))?;
        if account.disabled {
            return Err(IdentityProviderError::account_disabled(credentials.email()));
        }
        if account.password.as_str() != credentials.password() {
            return Err(IdentityProviderError::wrong_password(
                "password does not match",
            ));
        }
        Ok(SessionToken::new(
            account.user_id.clone(),
            Uuid::new_v4().to_string(),
        ))
    }
}

/// How the in-memory store answers writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBehaviour {
    /// Accept writes.
    #[default]
    Accept,
    /// Refuse writes as a permissions failure would.
    Reject,
    /// Fail writes as if the store were down.
    Unreachable,
}

/// Document store keeping profile records in a map keyed by collection and id.
///
/// Applies an owner-only rule: a writer may only write the document keyed by
/// its own account id.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<HashMap<(String, UserId), ProfileRecord>>,
    behaviour: Mutex<StoreBehaviour>,
    put_calls: AtomicUsize,
}

impl InMemoryDocumentStore {
    /// Change how subsequent writes are answered.
    pub fn set_behaviour(&self, behaviour: StoreBehaviour) {
        *lock(&self.behaviour) = behaviour;
    }

    /// Stored record at `collection/key`.
    pub fn get(&self, collection: &str, key: &UserId) -> Option<ProfileRecord> {
        lock(&self.documents)
            .get(&(collection.to_owned(), key.clone()))
            .cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        lock(&self.documents).len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `put` calls received, including failed ones.
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(
        &self,
        writer: &SessionToken,
        collection: &str,
        key: &UserId,
        record: &ProfileRecord,
    ) -> Result<(), DocumentStoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if writer.user_id() != key {
            return Err(DocumentStoreError::rejected(format!(
                "PERMISSION_DENIED: {} may not write {collection}/{key}",
                writer.user_id()
            )));
        }
        match *lock(&self.behaviour) {
            StoreBehaviour::Accept => {}
            StoreBehaviour::Reject => {
                return Err(DocumentStoreError::rejected(format!(
                    "write to {collection}/{key} denied"
                )));
            }
            StoreBehaviour::Unreachable => {
                return Err(DocumentStoreError::unreachable(
                    "in-memory store marked unreachable",
                ));
            }
        }
        lock(&self.documents).insert((collection.to_owned(), key.clone()), record.clone());
        Ok(())
    }
}
