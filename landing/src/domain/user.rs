//! Account identifiers, profile records and session tokens.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Placeholder username written into every new profile.
pub const DEFAULT_USERNAME: &str = "Student";
/// Collection that profile records are stored under.
pub const PROFILE_COLLECTION: &str = "users";

/// Validation errors for [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier contained whitespace or a path separator.
    #[error("user id must not contain whitespace or '/'")]
    InvalidCharacters,
}

/// Opaque account identifier issued by the identity provider.
///
/// The core never interprets the value; it only requires that it can be used
/// as a document key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns [`UserIdError::Empty`] for an empty id and
    /// [`UserIdError::InvalidCharacters`] when it holds whitespace or `/`.
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(UserIdError::InvalidCharacters);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Where new profiles are written and what placeholder name they get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTemplate {
    /// Document store collection for profile records.
    pub collection: String,
    /// Username assigned before the student edits their profile.
    pub username: String,
}

impl Default for ProfileTemplate {
    fn default() -> Self {
        Self {
            collection: PROFILE_COLLECTION.to_owned(),
            username: DEFAULT_USERNAME.to_owned(),
        }
    }
}

/// Application-level user document stored next to the identity account.
///
/// ## Invariants
/// - `id` equals the identity provider's account identifier.
/// - `email` is the registration email exactly as submitted.
///
/// Serialises with camelCase keys (`profileImage`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    username: String,
    profile_image: String,
    about: String,
    email: String,
    id: UserId,
    created_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Build a freshly registered profile with empty image and bio.
    pub fn new_default(
        template: &ProfileTemplate,
        id: UserId,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username: template.username.clone(),
            profile_image: String::new(),
            about: String::new(),
            email: email.into(),
            id,
            created_at,
        }
    }

    /// Display name shown in the app.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Avatar location; empty until the user uploads one.
    pub fn profile_image(&self) -> &str {
        self.profile_image.as_str()
    }

    /// Free-form bio; empty until edited.
    pub fn about(&self) -> &str {
        self.about.as_str()
    }

    /// Registration email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Identity provider account identifier, also the document key.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// When the record was built.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Proof of a successful sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    user_id: UserId,
    id_token: Zeroizing<String>,
}

impl SessionToken {
    /// Pair the signed-in account with the provider's bearer token.
    pub fn new(user_id: UserId, id_token: impl Into<String>) -> Self {
        Self {
            user_id,
            id_token: Zeroizing::new(id_token.into()),
        }
    }

    /// Account that signed in.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Provider-issued bearer token.
    pub fn id_token(&self) -> &str {
        self.id_token.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("user_id", &self.user_id)
            .field("id_token", &"<redacted>")
            .finish()
    }
}
