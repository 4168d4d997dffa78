//! `landing` command: register or sign in against Firebase from a terminal.
//!
//! Drives the same session controller the landing page uses, with
//! notifications and navigation written to the log. The password is read
//! from the first line of standard input so it never appears in argv.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, BufRead};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Report, Result, eyre};
use landing::LandingSettings;
use landing::domain::{AccountProvisioner, LoginOutcome, RegisterOutcome, SessionController};
use landing::outbound::firebase::{FirebaseIdentityProvider, FirestoreDocumentStore};
use landing::outbound::tracing_sink::{TracingNotificationSink, TracingRouter};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

/// `landing` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "landing",
    about = "Register or sign in a DHVStudy account",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Clone, Subcommand)]
enum Action {
    /// Create an account and its profile record.
    Register(FormArgs),
    /// Sign in with an existing account.
    Login(FormArgs),
}

#[derive(Debug, Clone, clap::Args)]
struct FormArgs {
    /// Account email address. The password is read from standard input.
    #[arg(long, value_name = "email")]
    email: String,
}

type FirebaseController = SessionController<FirebaseIdentityProvider, FirestoreDocumentStore>;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = LandingSettings::load_from_iter([OsString::from("landing")])
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let mut controller = build_controller(&settings)?;
    let password = read_password(&mut io::stdin().lock())?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(&mut controller, args.action, &password))
}

fn build_controller(settings: &LandingSettings) -> Result<FirebaseController> {
    let api_key = settings.firebase_api_key()?;
    let timeout = settings.request_timeout()?;
    let identity = FirebaseIdentityProvider::new(settings.auth_base_url()?, api_key, timeout)
        .wrap_err("failed to build identity provider client")?;
    let store = FirestoreDocumentStore::new(
        settings.store_base_url()?,
        settings.firebase_project_id()?,
        api_key,
        timeout,
    )
    .wrap_err("failed to build document store client")?;

    let provisioner =
        AccountProvisioner::new(Arc::new(identity), Arc::new(store), Arc::new(DefaultClock))
            .with_template(settings.profile_template());
    Ok(SessionController::new(
        provisioner,
        Arc::new(TracingNotificationSink),
        Arc::new(TracingRouter),
        settings.controller_policy()?,
    ))
}

async fn run(
    controller: &mut FirebaseController,
    action: Action,
    password: &str,
) -> Result<()> {
    match action {
        Action::Register(form) => {
            controller.open_register();
            fill(controller, form, password);
            match controller.submit_register().await {
                RegisterOutcome::Registered(record) => {
                    info!(user_id = %record.id(), "account registered");
                    Ok(())
                }
                RegisterOutcome::DomainRejected => Err(eyre!(
                    "{}",
                    controller
                        .last_error()
                        .unwrap_or("registration email rejected")
                )),
                RegisterOutcome::Failed(err) => {
                    Err(Report::new(err).wrap_err("registration failed"))
                }
            }
        }
        Action::Login(form) => {
            controller.open_login();
            fill(controller, form, password);
            match controller.submit_login().await {
                LoginOutcome::SignedIn(session) => {
                    info!(user_id = %session.user_id(), "signed in");
                    Ok(())
                }
                LoginOutcome::Incomplete | LoginOutcome::Rejected => {
                    Err(eyre!("sign-in failed"))
                }
            }
        }
    }
}

fn fill(controller: &mut FirebaseController, form: FormArgs, password: &str) {
    controller.set_email(form.email);
    controller.set_password(password);
}

/// First line of `input` without its line ending.
fn read_password(input: &mut impl BufRead) -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    input
        .read_line(&mut line)
        .wrap_err("failed to read password from standard input")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(eyre!("expected a password on standard input"));
    }
    Ok(Zeroizing::new(password.to_owned()))
}
