//! Driven port for the document store that holds profile records.
//!
//! Only writes are needed: the landing flow creates profiles and never reads
//! them back.

use async_trait::async_trait;

use crate::domain::{ProfileRecord, SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures reported by document store adapters.
    pub enum DocumentStoreError {
        /// The store could not be reached or failed internally.
        Unreachable { message: String } => "document store unreachable: {message}",
        /// The store refused the write (permissions or validation).
        Rejected { message: String } => "document write rejected: {message}",
    }
}

/// Document store capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create or replace the document at `collection/key`, acting as the
    /// account that owns `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Rejected`] when the store refuses the
    /// write and [`DocumentStoreError::Unreachable`] when it cannot be asked.
    async fn put(
        &self,
        writer: &SessionToken,
        collection: &str,
        key: &UserId,
        record: &ProfileRecord,
    ) -> Result<(), DocumentStoreError>;
}
