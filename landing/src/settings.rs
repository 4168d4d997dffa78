//! Runtime configuration loaded via OrthoConfig.
//!
//! Every field is optional; accessors fall back to the DHVSU defaults so an
//! empty environment still yields a working policy.

use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    AllowedDomainError, AllowedEmailDomain, ControllerPolicy, DEFAULT_ALLOWED_DOMAIN,
    DEFAULT_AUTHENTICATED_ROUTE, DEFAULT_INSTITUTION_NAME, DEFAULT_USERNAME, PROFILE_COLLECTION,
    ProfileTemplate,
};
use crate::outbound::firebase::{DEFAULT_AUTH_BASE_URL, DEFAULT_STORE_BASE_URL};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors raised while turning loaded settings into runtime values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The configured email domain is unusable.
    #[error("invalid allowed domain: {0}")]
    AllowedDomain(#[from] AllowedDomainError),
    /// A base URL failed to parse.
    #[error("invalid {name} `{value}`: {source}")]
    BaseUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// A Firebase credential needed by the remote adapters is absent.
    #[error("missing setting: {0}")]
    Missing(&'static str),
    /// Timeouts must be positive.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Configuration for the landing session core and its Firebase adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LANDING")]
pub struct LandingSettings {
    /// Email suffix accepted at registration.
    pub allowed_domain: Option<String>,
    /// Route opened after a successful sign-in.
    pub authenticated_route: Option<String>,
    /// Institution named in the disallowed-domain warning.
    pub institution_name: Option<String>,
    /// Collection profile records are written to.
    pub profile_collection: Option<String>,
    /// Username given to new profiles.
    pub default_username: Option<String>,
    /// Firebase web API key.
    pub firebase_api_key: Option<String>,
    /// Firebase project hosting the Firestore database.
    pub firebase_project_id: Option<String>,
    /// Identity Toolkit base URL override.
    pub auth_base_url: Option<String>,
    /// Firestore base URL override.
    pub store_base_url: Option<String>,
    /// Per-request timeout for the remote adapters.
    pub request_timeout_secs: Option<u64>,
}

impl LandingSettings {
    pub fn allowed_domain(&self) -> &str {
        self.allowed_domain
            .as_deref()
            .unwrap_or(DEFAULT_ALLOWED_DOMAIN)
    }

    pub fn authenticated_route(&self) -> &str {
        self.authenticated_route
            .as_deref()
            .unwrap_or(DEFAULT_AUTHENTICATED_ROUTE)
    }

    pub fn institution_name(&self) -> &str {
        self.institution_name
            .as_deref()
            .unwrap_or(DEFAULT_INSTITUTION_NAME)
    }

    pub fn profile_collection(&self) -> &str {
        self.profile_collection
            .as_deref()
            .unwrap_or(PROFILE_COLLECTION)
    }

    pub fn default_username(&self) -> &str {
        self.default_username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    /// Firebase API key, required by both remote adapters.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when unset or blank.
    pub fn firebase_api_key(&self) -> Result<&str, SettingsError> {
        required(self.firebase_api_key.as_deref(), "firebase_api_key")
    }

    /// Firebase project id, required by the document store.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when unset or blank.
    pub fn firebase_project_id(&self) -> Result<&str, SettingsError> {
        required(self.firebase_project_id.as_deref(), "firebase_project_id")
    }

    /// Parsed Identity Toolkit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BaseUrl`] when the override does not parse.
    pub fn auth_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "auth_base_url",
            self.auth_base_url.as_deref().unwrap_or(DEFAULT_AUTH_BASE_URL),
        )
    }

    /// Parsed Firestore base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BaseUrl`] when the override does not parse.
    pub fn store_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "store_base_url",
            self.store_base_url
                .as_deref()
                .unwrap_or(DEFAULT_STORE_BASE_URL),
        )
    }

    /// Request timeout for the remote adapters.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero override.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Controller policy built from the configured domain, route and
    /// institution.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::AllowedDomain`] when the domain is unusable.
    pub fn controller_policy(&self) -> Result<ControllerPolicy, SettingsError> {
        Ok(ControllerPolicy {
            allowed_domain: AllowedEmailDomain::new(self.allowed_domain())?,
            authenticated_route: self.authenticated_route().to_owned(),
            institution_name: self.institution_name().to_owned(),
        })
    }

    pub fn profile_template(&self) -> ProfileTemplate {
        ProfileTemplate {
            collection: self.profile_collection().to_owned(),
            username: self.default_username().to_owned(),
        }
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(SettingsError::Missing(name))
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::BaseUrl {
        name,
        value: value.to_owned(),
        source,
    })
}
