//! Credentials and the registration email-domain gate.
//!
//! Credentials are transient: the session controller rebuilds them from its
//! form fields for each submission and never persists them.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// Email suffix accepted by registration unless configured otherwise.
pub const DEFAULT_ALLOWED_DOMAIN: &str = "@dhvsu.edu.ph";

/// Errors raised when credentials are missing a required part.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    /// Email field was empty.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password field was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Email/password pair handed to the identity provider.
///
/// ## Invariants
/// - `email` is kept exactly as typed; profile records copy it verbatim.
/// - `password` lives in zeroizing storage and is redacted from `Debug`.
///
/// # Examples
/// ```
/// use landing::domain::Credentials;
///
/// let creds = Credentials::try_filled("student@dhvsu.edu.ph", "validpass1").unwrap();
/// assert_eq!(creds.email(), "student@dhvsu.edu.ph");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Wrap raw form values without any checks.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Build credentials, rejecting an empty email or password.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::EmptyEmail`] or
    /// [`CredentialsError::EmptyPassword`] for the first empty field.
    pub fn try_filled(email: &str, password: &str) -> Result<Self, CredentialsError> {
        if email.is_empty() {
            return Err(CredentialsError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self::new(email, password))
    }

    /// Email exactly as entered.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as entered.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Local rejection of a registration email; never reaches the provisioner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainValidationError {
    /// The email does not end with the allowed suffix.
    #[error("email must end with {allowed}")]
    DisallowedDomain {
        /// Suffix the email was checked against.
        allowed: String,
    },
}

/// Errors raised while configuring the allowed domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllowedDomainError {
    /// No domain remained after trimming and removing the leading `@`.
    #[error("allowed domain must not be empty")]
    Empty,
    /// The domain contained whitespace or another `@`.
    #[error("allowed domain `{0}` is not a bare domain name")]
    Malformed(String),
}

/// Email suffix that registration is restricted to.
///
/// Stored with a leading `@` so `evil-dhvsu.edu.ph` cannot pass a check for
/// `dhvsu.edu.ph`. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedEmailDomain(String);

impl AllowedEmailDomain {
    /// Parse a domain given with or without its leading `@`.
    ///
    /// # Examples
    /// ```
    /// use landing::domain::AllowedEmailDomain;
    ///
    /// let domain = AllowedEmailDomain::new("dhvsu.edu.ph").unwrap();
    /// assert_eq!(domain.as_ref(), "@dhvsu.edu.ph");
    /// assert!(domain.check("student@dhvsu.edu.ph").is_ok());
    /// assert!(domain.check("student@gmail.com").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`AllowedDomainError::Empty`] when nothing but `@` and
    /// whitespace was given, and [`AllowedDomainError::Malformed`] when the
    /// domain contains whitespace or another `@`.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AllowedDomainError> {
        let trimmed = raw.as_ref().trim();
        let bare = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if bare.is_empty() {
            return Err(AllowedDomainError::Empty);
        }
        if bare.contains('@') || bare.chars().any(char::is_whitespace) {
            return Err(AllowedDomainError::Malformed(trimmed.to_owned()));
        }
        Ok(Self(format!("@{bare}")))
    }

    /// Accept `email` only when it ends with this suffix.
    ///
    /// # Errors
    ///
    /// Returns [`DomainValidationError::DisallowedDomain`] naming the suffix.
    pub fn check(&self, email: &str) -> Result<(), DomainValidationError> {
        if email.ends_with(self.0.as_str()) {
            Ok(())
        } else {
            Err(DomainValidationError::DisallowedDomain {
                allowed: self.0.clone(),
            })
        }
    }
}

impl Default for AllowedEmailDomain {
    fn default() -> Self {
        Self(DEFAULT_ALLOWED_DOMAIN.to_owned())
    }
}

impl AsRef<str> for AllowedEmailDomain {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AllowedEmailDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
