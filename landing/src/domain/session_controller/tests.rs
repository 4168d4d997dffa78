//! Unit tests for the session controller.
//!
//! Provider, store, sink and router are all mocks so each test states exactly
//! which collaborators may be called and how often.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;

use super::{
    ControllerPolicy, LOGIN_FAILURE_MESSAGE, LOGIN_SUCCESS_MESSAGE, LoginOutcome,
    REGISTER_SUCCESS_MESSAGE, RegisterOutcome, SessionController,
};
use crate::domain::ports::{
    CreatedAccount, DocumentStoreError, IdentityProviderError, MockDocumentStore,
    MockIdentityProvider, MockNotificationSink, MockRouter,
};
use crate::domain::{AccountProvisioner, NotificationKind, SessionToken, UiMode, UserId};

const DHVSU_EMAIL: &str = "student@dhvsu.edu.ph";
const PASSWORD: &str = "validpass1";
const DOMAIN_WARNING: &str = "Invalid email. Only DHVSU emails are allowed.";

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 4, 9, 15, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

fn user_id() -> UserId {
    UserId::new("uid-42").expect("valid user id")
}

fn created_account() -> CreatedAccount {
    CreatedAccount {
        session: SessionToken::new(user_id(), "sign-up-id-token"),
    }
}

/// Collaborators for one controller under test.
struct Doubles {
    identity: MockIdentityProvider,
    store: MockDocumentStore,
    sink: MockNotificationSink,
    router: MockRouter,
}

impl Doubles {
    fn new() -> Self {
        Self {
            identity: MockIdentityProvider::new(),
            store: MockDocumentStore::new(),
            sink: MockNotificationSink::new(),
            router: MockRouter::new(),
        }
    }

    fn expect_notification(&mut self, kind: NotificationKind, message: &'static str) {
        self.sink
            .expect_notify()
            .withf(move |k, m| *k == kind && m == message)
            .times(1)
            .return_const(());
    }

    fn build(self) -> SessionController<MockIdentityProvider, MockDocumentStore> {
        let provisioner = AccountProvisioner::new(
            Arc::new(self.identity),
            Arc::new(self.store),
            Arc::new(FixtureClock),
        );
        SessionController::new(
            provisioner,
            Arc::new(self.sink),
            Arc::new(self.router),
            ControllerPolicy::default(),
        )
    }
}

fn fill(controller: &mut SessionController<MockIdentityProvider, MockDocumentStore>, email: &str) {
    controller.set_email(email);
    controller.set_password(PASSWORD);
}

#[test]
fn starts_idle_with_empty_fields() {
    let controller = Doubles::new().build();
    assert_eq!(controller.ui_mode(), UiMode::Idle);
    assert_eq!(controller.email(), "");
    assert_eq!(controller.password(), "");
    assert_eq!(controller.last_error(), None);
}

#[test]
fn opening_register_after_login_closes_login_and_clears_fields() {
    let mut controller = Doubles::new().build();
    controller.open_login();
    fill(&mut controller, DHVSU_EMAIL);

    controller.open_register();

    assert_eq!(controller.ui_mode(), UiMode::RegisterOpen);
    assert_eq!(controller.email(), "");
    assert_eq!(controller.password(), "");
}

#[rstest]
#[case::reopen_login(UiMode::LoginOpen)]
#[case::reopen_register(UiMode::RegisterOpen)]
fn reopening_same_modal_still_resets_fields(#[case] mode: UiMode) {
    let mut controller = Doubles::new().build();
    let open = |c: &mut SessionController<_, _>| match mode {
        UiMode::LoginOpen => c.open_login(),
        _ => c.open_register(),
    };
    open(&mut controller);
    fill(&mut controller, DHVSU_EMAIL);

    open(&mut controller);

    assert_eq!(controller.ui_mode(), mode);
    assert_eq!(controller.email(), "");
    assert_eq!(controller.password(), "");
}

#[test]
fn switch_links_toggle_between_modals() {
    let mut controller = Doubles::new().build();
    controller.open_login();
    controller.switch_to_register();
    assert_eq!(controller.ui_mode(), UiMode::RegisterOpen);
    controller.switch_to_login();
    assert_eq!(controller.ui_mode(), UiMode::LoginOpen);
}

#[test]
fn close_returns_to_idle_and_clears_fields() {
    let mut controller = Doubles::new().build();
    controller.open_register();
    fill(&mut controller, DHVSU_EMAIL);

    controller.close();

    assert_eq!(controller.ui_mode(), UiMode::Idle);
    assert_eq!(controller.email(), "");
}

#[rstest]
#[case("student@gmail.com")]
#[case("student@dhvsu.edu.ph.evil.com")]
#[case("")]
#[tokio::test]
async fn register_outside_domain_warns_without_calling_provider(#[case] email: &str) {
    let mut doubles = Doubles::new();
    doubles.identity.expect_create_account().times(0);
    doubles.store.expect_put().times(0);
    doubles.expect_notification(NotificationKind::Warning, DOMAIN_WARNING);
    let mut controller = doubles.build();
    controller.open_register();
    fill(&mut controller, email);

    let outcome = controller.submit_register().await;

    assert_eq!(outcome, RegisterOutcome::DomainRejected);
    assert_eq!(controller.ui_mode(), UiMode::RegisterOpen);
    assert_eq!(controller.email(), email);
    assert_eq!(controller.last_error(), Some(DOMAIN_WARNING));
}

#[tokio::test]
async fn successful_register_closes_modal_and_clears_fields() {
    let mut doubles = Doubles::new();
    doubles
        .identity
        .expect_create_account()
        .withf(|creds| creds.email() == DHVSU_EMAIL && creds.password() == PASSWORD)
        .times(1)
        .returning(|_| Ok(created_account()));
    doubles
        .store
        .expect_put()
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    doubles.expect_notification(NotificationKind::Success, REGISTER_SUCCESS_MESSAGE);
    let mut controller = doubles.build();
    controller.open_register();
    fill(&mut controller, DHVSU_EMAIL);

    let outcome = controller.submit_register().await;

    let record = match outcome {
        RegisterOutcome::Registered(record) => record,
        other => panic!("expected registration to succeed, got {other:?}"),
    };
    assert_eq!(record.email(), DHVSU_EMAIL);
    assert_eq!(record.id(), &user_id());
    assert_eq!(controller.ui_mode(), UiMode::Idle);
    assert_eq!(controller.email(), "");
    assert_eq!(controller.password(), "");
}

#[tokio::test]
async fn register_failure_surfaces_provider_message_and_keeps_fields() {
    let mut doubles = Doubles::new();
    doubles
        .identity
        .expect_create_account()
        .times(1)
        .returning(|_| Err(IdentityProviderError::email_already_registered("EMAIL_EXISTS")));
    doubles.store.expect_put().times(0);
    doubles.expect_notification(
        NotificationKind::Error,
        "email address is already in use: EMAIL_EXISTS",
    );
    let mut controller = doubles.build();
    controller.open_register();
    fill(&mut controller, DHVSU_EMAIL);

    let outcome = controller.submit_register().await;

    assert!(matches!(outcome, RegisterOutcome::Failed(_)));
    assert_eq!(controller.ui_mode(), UiMode::RegisterOpen);
    assert_eq!(controller.email(), DHVSU_EMAIL);
    assert_eq!(controller.password(), PASSWORD);
    assert_eq!(
        controller.last_error(),
        Some("email address is already in use: EMAIL_EXISTS")
    );
}

#[tokio::test]
async fn register_profile_write_failure_reports_orphan() {
    let mut doubles = Doubles::new();
    doubles
        .identity
        .expect_create_account()
        .times(1)
        .returning(|_| Ok(created_account()));
    doubles
        .store
        .expect_put()
        .times(1)
        .returning(|_, _, _, _| Err(DocumentStoreError::rejected("PERMISSION_DENIED")));
    doubles.expect_notification(
        NotificationKind::Error,
        "document write rejected: PERMISSION_DENIED",
    );
    let mut controller = doubles.build();
    controller.open_register();
    fill(&mut controller, DHVSU_EMAIL);

    let outcome = controller.submit_register().await;

    let err = match outcome {
        RegisterOutcome::Failed(err) => err,
        other => panic!("expected a provisioning failure, got {other:?}"),
    };
    assert_eq!(err.orphaned_user_id(), Some(&user_id()));
    assert_eq!(controller.ui_mode(), UiMode::RegisterOpen);
}

#[tokio::test]
async fn successful_login_navigates_and_keeps_modal() {
    let mut doubles = Doubles::new();
    doubles
        .identity
        .expect_sign_in()
        .times(1)
        .returning(|_| Ok(SessionToken::new(user_id(), "id-token")));
    doubles.expect_notification(NotificationKind::Success, LOGIN_SUCCESS_MESSAGE);
    doubles
        .router
        .expect_navigate_to()
        .withf(|route| route == "/home")
        .times(1)
        .return_const(());
    let mut controller = doubles.build();
    controller.open_login();
    fill(&mut controller, DHVSU_EMAIL);

    let outcome = controller.submit_login().await;

    assert!(matches!(outcome, LoginOutcome::SignedIn(ref token) if token.user_id() == &user_id()));
    assert_eq!(controller.ui_mode(), UiMode::LoginOpen);
}

#[rstest]
#[case::wrong_password(IdentityProviderError::wrong_password("INVALID_PASSWORD"))]
#[case::unknown_email(IdentityProviderError::unknown_email("EMAIL_NOT_FOUND"))]
#[case::disabled(IdentityProviderError::account_disabled("USER_DISABLED"))]
#[tokio::test]
async fn login_failure_shows_generic_message(#[case] failure: IdentityProviderError) {
    let mut doubles = Doubles::new();
    doubles
        .identity
        .expect_sign_in()
        .times(1)
        .return_once(move |_| Err(failure));
    doubles.router.expect_navigate_to().times(0);
    doubles.expect_notification(NotificationKind::Error, LOGIN_FAILURE_MESSAGE);
    let mut controller = doubles.build();
    controller.open_login();
    fill(&mut controller, DHVSU_EMAIL);

    let outcome = controller.submit_login().await;

    assert_eq!(outcome, LoginOutcome::Rejected);
    assert_eq!(controller.ui_mode(), UiMode::LoginOpen);
    assert_eq!(controller.email(), DHVSU_EMAIL);
    assert_eq!(controller.last_error(), Some(LOGIN_FAILURE_MESSAGE));
}

#[rstest]
#[case::no_email("", PASSWORD)]
#[case::no_password(DHVSU_EMAIL, "")]
#[tokio::test]
async fn login_with_empty_field_never_calls_provider(
    #[case] email: &str,
    #[case] password: &str,
) {
    let mut doubles = Doubles::new();
    doubles.identity.expect_sign_in().times(0);
    doubles.expect_notification(NotificationKind::Error, LOGIN_FAILURE_MESSAGE);
    let mut controller = doubles.build();
    controller.open_login();
    controller.set_email(email);
    controller.set_password(password);

    assert_eq!(controller.submit_login().await, LoginOutcome::Incomplete);
}

#[test]
fn domain_warning_names_configured_institution() {
    let policy = ControllerPolicy {
        institution_name: "PSU".to_owned(),
        ..ControllerPolicy::default()
    };
    assert_eq!(
        policy.disallowed_domain_message(),
        "Invalid email. Only PSU emails are allowed."
    );
}
