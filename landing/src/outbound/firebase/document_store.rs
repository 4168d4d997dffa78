//! Reqwest-backed Firestore adapter.
//!
//! Writes profile records with a document `PATCH`, which creates the
//! document when missing and replaces its fields otherwise. Each write
//! carries the writer's id token as a bearer credential so security rules
//! see the owning account.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::debug;

use super::dto::FirestoreDocumentDto;
use super::{endpoint, error_message};
use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{ProfileRecord, SessionToken, UserId};

const DEFAULT_DATABASE: &str = "(default)";

/// Document store talking to the Firestore REST API.
pub struct FirestoreDocumentStore {
    client: Client,
    base_url: Url,
    project_id: String,
    api_key: String,
}

impl FirestoreDocumentStore {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            project_id: project_id.into(),
            api_key: api_key.into(),
        })
    }

    fn document_url(&self, collection: &str, key: &UserId) -> Result<Url, DocumentStoreError> {
        endpoint(
            &self.base_url,
            &[
                "projects",
                self.project_id.as_str(),
                "databases",
                DEFAULT_DATABASE,
                "documents",
                collection,
                key.as_ref(),
            ],
        )
        .map_err(DocumentStoreError::rejected)
    }

    fn write_request(
        &self,
        writer: &SessionToken,
        collection: &str,
        key: &UserId,
        record: &ProfileRecord,
    ) -> Result<RequestBuilder, DocumentStoreError> {
        let url = self.document_url(collection, key)?;
        Ok(self
            .client
            .patch(url)
            .query(&[("key", self.api_key.as_str())])
            .bearer_auth(writer.id_token())
            .json(&FirestoreDocumentDto::from(record)))
    }
}

#[async_trait]
impl DocumentStore for FirestoreDocumentStore {
    async fn put(
        &self,
        writer: &SessionToken,
        collection: &str,
        key: &UserId,
        record: &ProfileRecord,
    ) -> Result<(), DocumentStoreError> {
        let response = self
            .write_request(writer, collection, key, record)?
            .send()
            .await
            .map_err(|err| DocumentStoreError::unreachable(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| DocumentStoreError::unreachable(err.to_string()))?;
        let error = map_status_error(status, body.as_ref());
        debug!(collection, user_id = %key, status = status.as_u16(), %error, "firestore write failed");
        Err(error)
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DocumentStoreError {
    let message = format!("status {}: {}", status.as_u16(), error_message(body));
    match status {
        StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT => {
            DocumentStoreError::unreachable(message)
        }
        _ if status.is_server_error() => DocumentStoreError::unreachable(message),
        _ => DocumentStoreError::rejected(message),
    }
}
