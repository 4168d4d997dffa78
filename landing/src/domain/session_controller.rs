//! Landing-page session controller.
//!
//! Owns the login/register form state and the exclusive modal mode, and
//! turns provisioning and sign-in outcomes into notifications, navigation and
//! mode changes. The presentation layer mirrors inputs in with
//! [`SessionController::set_email`] / [`SessionController::set_password`] and
//! renders whatever [`SessionController::ui_mode`] says.

use std::sync::Arc;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{DocumentStore, IdentityProvider, NotificationSink, Router};
use crate::domain::{
    AccountProvisioner, AllowedEmailDomain, Credentials, NotificationKind, ProfileRecord,
    ProvisionError, SessionToken, UiMode,
};

/// Shown after a successful sign-in.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Logged in successfully!";
/// Shown for every sign-in failure, whatever the cause.
pub const LOGIN_FAILURE_MESSAGE: &str = "Error logging in: ";
/// Shown after an account and its profile were created.
pub const REGISTER_SUCCESS_MESSAGE: &str = "Account created successfully!";
/// Route opened after sign-in unless configured otherwise.
pub const DEFAULT_AUTHENTICATED_ROUTE: &str = "/home";
/// Institution named in the domain warning unless configured otherwise.
pub const DEFAULT_INSTITUTION_NAME: &str = "DHVSU";

/// Local rules and copy the controller applies before calling out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerPolicy {
    /// Registration email suffix.
    pub allowed_domain: AllowedEmailDomain,
    /// Route opened after a successful sign-in.
    pub authenticated_route: String,
    /// Institution named in the disallowed-domain warning.
    pub institution_name: String,
}

impl ControllerPolicy {
    /// Warning shown when a registration email has the wrong domain.
    pub fn disallowed_domain_message(&self) -> String {
        format!(
            "Invalid email. Only {} emails are allowed.",
            self.institution_name
        )
    }
}

impl Default for ControllerPolicy {
    fn default() -> Self {
        Self {
            allowed_domain: AllowedEmailDomain::default(),
            authenticated_route: DEFAULT_AUTHENTICATED_ROUTE.to_owned(),
            institution_name: DEFAULT_INSTITUTION_NAME.to_owned(),
        }
    }
}

/// What a login submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted; the router was sent to the authenticated route.
    SignedIn(SessionToken),
    /// Email or password was empty; the provider was not called.
    Incomplete,
    /// The provider refused the credentials.
    Rejected,
}

/// What a registration submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Account and profile created; the modal closed.
    Registered(ProfileRecord),
    /// The email domain is not allowed; nothing was called.
    DomainRejected,
    /// Provisioning failed; the modal stays open with its fields.
    Failed(ProvisionError),
}

/// Form and modal state for one rendered landing page.
pub struct SessionController<I, D> {
    provisioner: AccountProvisioner<I, D>,
    notifications: Arc<dyn NotificationSink>,
    router: Arc<dyn Router>,
    policy: ControllerPolicy,
    ui_mode: UiMode,
    email: String,
    password: Zeroizing<String>,
    last_error: Option<String>,
}

impl<I, D> SessionController<I, D> {
    /// Create an idle controller with empty fields.
    pub fn new(
        provisioner: AccountProvisioner<I, D>,
        notifications: Arc<dyn NotificationSink>,
        router: Arc<dyn Router>,
        policy: ControllerPolicy,
    ) -> Self {
        Self {
            provisioner,
            notifications,
            router,
            policy,
            ui_mode: UiMode::Idle,
            email: String::new(),
            password: Zeroizing::default(),
            last_error: None,
        }
    }

    /// Modal currently shown.
    pub fn ui_mode(&self) -> UiMode {
        self.ui_mode
    }

    /// Email field contents.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password field contents.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Message of the most recent failed submission, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Mirror the email input.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    /// Mirror the password input.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = Zeroizing::new(value.into());
    }

    /// Show the login modal, closing the register modal and clearing fields.
    pub fn open_login(&mut self) {
        self.enter(UiMode::LoginOpen);
    }

    /// Show the register modal, closing the login modal and clearing fields.
    pub fn open_register(&mut self) {
        self.enter(UiMode::RegisterOpen);
    }

    /// "Sign up" link inside the login modal.
    pub fn switch_to_register(&mut self) {
        self.enter(UiMode::RegisterOpen);
    }

    /// "Login" link inside the register modal.
    pub fn switch_to_login(&mut self) {
        self.enter(UiMode::LoginOpen);
    }

    /// Dismiss whichever modal is open and clear fields.
    pub fn close(&mut self) {
        self.enter(UiMode::Idle);
    }

    fn enter(&mut self, mode: UiMode) {
        debug!(from = ?self.ui_mode, to = ?mode, "modal transition");
        self.ui_mode = mode;
        self.reset_fields();
    }

    fn reset_fields(&mut self) {
        self.email.clear();
        self.password.clear();
        self.last_error = None;
    }

    fn fail(&mut self, kind: NotificationKind, message: String) {
        self.notifications.notify(kind, &message);
        self.last_error = Some(message);
    }
}

impl<I, D> SessionController<I, D>
where
    I: IdentityProvider,
    D: DocumentStore,
{
    /// Sign in with the current fields.
    ///
    /// On success the router moves to the authenticated route and the modal
    /// is left as it is. Every failure shows the same generic message.
    pub async fn submit_login(&mut self) -> LoginOutcome {
        let Ok(credentials) = Credentials::try_filled(&self.email, &self.password) else {
            self.fail(NotificationKind::Error, LOGIN_FAILURE_MESSAGE.to_owned());
            return LoginOutcome::Incomplete;
        };

        match self.provisioner.sign_in(&credentials).await {
            Ok(token) => {
                self.last_error = None;
                self.notifications
                    .notify(NotificationKind::Success, LOGIN_SUCCESS_MESSAGE);
                self.router.navigate_to(&self.policy.authenticated_route);
                LoginOutcome::SignedIn(token)
            }
            Err(_) => {
                self.fail(NotificationKind::Error, LOGIN_FAILURE_MESSAGE.to_owned());
                LoginOutcome::Rejected
            }
        }
    }

    /// Register with the current fields.
    ///
    /// Emails outside the allowed domain are rejected locally with a warning.
    /// Provisioning failures show the underlying message and keep the modal
    /// open with the fields untouched.
    pub async fn submit_register(&mut self) -> RegisterOutcome {
        if let Err(rejection) = self.policy.allowed_domain.check(&self.email) {
            warn!(error = %rejection, "registration email outside allowed domain");
            let message = self.policy.disallowed_domain_message();
            self.fail(NotificationKind::Warning, message);
            return RegisterOutcome::DomainRejected;
        }

        let credentials = Credentials::new(self.email.as_str(), self.password.as_str());
        match self.provisioner.register_account(&credentials).await {
            Ok(record) => {
                self.close();
                self.notifications
                    .notify(NotificationKind::Success, REGISTER_SUCCESS_MESSAGE);
                RegisterOutcome::Registered(record)
            }
            Err(err) => {
                self.fail(NotificationKind::Error, err.to_string());
                RegisterOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests;
