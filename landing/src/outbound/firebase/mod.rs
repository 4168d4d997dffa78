//! Firebase REST adapters for the identity provider and document store
//! ports.
//!
//! Both adapters speak the public REST surface (Identity Toolkit v1 and
//! Firestore v1) with an API key, so no SDK is involved.

mod document_store;
mod dto;
mod identity_provider;

use reqwest::Url;

pub use document_store::FirestoreDocumentStore;
pub use identity_provider::FirebaseIdentityProvider;

/// Identity Toolkit base URL used when none is configured.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
/// Firestore base URL used when none is configured.
pub const DEFAULT_STORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Append path segments to `base`, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, String> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| format!("base URL `{base}` cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Single-line, length-capped rendering of a response body for error text.
fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Error code from a Google API error envelope, or a body preview when the
/// body is not one.
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<dto::ErrorEnvelopeDto>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body_preview(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_encoded_segments() {
        let base = Url::parse("https://firestore.googleapis.com/v1/").expect("valid url");
        let url = endpoint(&base, &["projects", "demo", "documents", "users", "a b"])
            .expect("base accepts paths");
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/demo/documents/users/a%20b"
        );
    }

    #[test]
    fn endpoint_keeps_colon_actions() {
        let base = Url::parse(DEFAULT_AUTH_BASE_URL).expect("valid url");
        let url = endpoint(&base, &["accounts:signUp"]).expect("base accepts paths");
        assert_eq!(
            url.as_str(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp"
        );
    }

    #[test]
    fn error_message_prefers_envelope_code() {
        let body = br#"{"error": {"code": 400, "message": "EMAIL_EXISTS", "errors": []}}"#;
        assert_eq!(error_message(body), "EMAIL_EXISTS");
    }

    #[test]
    fn error_message_falls_back_to_compact_preview() {
        assert_eq!(error_message(b"<html>\n  Bad   Gateway\n</html>"), "<html> Bad Gateway </html>");
        let long = "x".repeat(200);
        let preview = error_message(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
