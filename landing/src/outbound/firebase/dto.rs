//! Wire DTOs for the Firebase Auth and Firestore REST APIs.
//!
//! Adapters serialise requests from and decode responses into these types,
//! then map them onto domain values in one place.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::domain::{Credentials, ProfileRecord};

/// Body of `accounts:signUp` and `accounts:signInWithPassword`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PasswordRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) return_secure_token: bool,
}

impl<'a> PasswordRequestDto<'a> {
    pub(super) fn from_credentials(credentials: &'a Credentials) -> Self {
        Self {
            email: credentials.email(),
            password: credentials.password(),
            return_secure_token: true,
        }
    }
}

/// Successful auth response; only the fields the core uses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AuthResponseDto {
    pub(super) local_id: String,
    #[serde(default)]
    pub(super) id_token: String,
}

/// Google API error envelope: `{"error": {"code": 400, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: String,
}

/// Firestore typed value. Serialises as `{"stringValue": "..."}` and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) enum FirestoreValueDto {
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "timestampValue")]
    Timestamp(String),
}

/// Firestore document body for a create-or-replace `PATCH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct FirestoreDocumentDto {
    pub(super) fields: BTreeMap<&'static str, FirestoreValueDto>,
}

impl From<&ProfileRecord> for FirestoreDocumentDto {
    fn from(record: &ProfileRecord) -> Self {
        let string = |value: &str| FirestoreValueDto::String(value.to_owned());
        let fields = BTreeMap::from([
            ("username", string(record.username())),
            ("profileImage", string(record.profile_image())),
            ("about", string(record.about())),
            ("email", string(record.email())),
            ("id", string(record.id().as_ref())),
            (
                "createdAt",
                FirestoreValueDto::Timestamp(
                    record
                        .created_at()
                        .to_rfc3339_opts(SecondsFormat::Micros, true),
                ),
            ),
        ]);
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProfileTemplate, UserId};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn profile_encodes_as_typed_firestore_fields() {
        let created_at = Utc
            .with_ymd_and_hms(2024, 11, 4, 9, 15, 0)
            .single()
            .expect("valid timestamp");
        let record = ProfileRecord::new_default(
            &ProfileTemplate::default(),
            UserId::new("uid-9").expect("valid id"),
            "student@dhvsu.edu.ph",
            created_at,
        );

        let body = serde_json::to_value(FirestoreDocumentDto::from(&record)).expect("encodes");

        assert_eq!(
            body,
            json!({
                "fields": {
                    "about": { "stringValue": "" },
                    "createdAt": { "timestampValue": "2024-11-04T09:15:00.000000Z" },
                    "email": { "stringValue": "student@dhvsu.edu.ph" },
                    "id": { "stringValue": "uid-9" },
                    "profileImage": { "stringValue": "" },
                    "username": { "stringValue": "Student" },
                }
            })
        );
    }

    #[test]
    fn password_request_asks_for_secure_token() {
        let creds = Credentials::new("student@dhvsu.edu.ph", "validpass1");
        let body =
            serde_json::to_value(PasswordRequestDto::from_credentials(&creds)).expect("encodes");
        assert_eq!(
            body,
            json!({
                "email": "student@dhvsu.edu.ph",
                "password": "validpass1",
                "returnSecureToken": true,
            })
        );
    }
}
