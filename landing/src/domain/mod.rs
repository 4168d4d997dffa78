//! Landing-page domain: credentials, profile records, modal state and the two
//! services that drive registration and sign-in.
//!
//! Public surface:
//! - `SessionController`: form fields, exclusive modal mode, submissions.
//! - `AccountProvisioner`: identity creation plus profile write, and sign-in.
//! - `ports`: capabilities the services are wired against.

pub mod account_provisioner;
pub mod auth;
pub mod error;
pub mod notification;
pub mod ports;
pub mod session_controller;
pub mod ui_mode;
pub mod user;

pub use self::account_provisioner::AccountProvisioner;
pub use self::auth::{
    AllowedDomainError, AllowedEmailDomain, Credentials, CredentialsError, DEFAULT_ALLOWED_DOMAIN,
    DomainValidationError,
};
pub use self::error::{AuthError, ProvisionError};
pub use self::notification::{Notification, NotificationKind};
pub use self::session_controller::{
    ControllerPolicy, DEFAULT_AUTHENTICATED_ROUTE, DEFAULT_INSTITUTION_NAME, LOGIN_FAILURE_MESSAGE,
    LOGIN_SUCCESS_MESSAGE, LoginOutcome, REGISTER_SUCCESS_MESSAGE, RegisterOutcome,
    SessionController,
};
pub use self::ui_mode::UiMode;
pub use self::user::{
    DEFAULT_USERNAME, PROFILE_COLLECTION, ProfileRecord, ProfileTemplate, SessionToken, UserId,
    UserIdError,
};
