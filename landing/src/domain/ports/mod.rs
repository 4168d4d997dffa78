//! Capability ports the landing core is wired against.
//!
//! Identity provider and document store are the two external systems the
//! registration flow writes to; notification sink and router are the
//! presentation collaborators the session controller calls into.

mod macros;
pub(crate) use macros::define_port_error;

mod document_store;
mod identity_provider;
mod notification_sink;
mod router;

#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use document_store::{DocumentStore, DocumentStoreError};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{CreatedAccount, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::NotificationSink;
#[cfg(test)]
pub use router::MockRouter;
pub use router::Router;
