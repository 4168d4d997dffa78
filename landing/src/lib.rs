//! Session core for the DHVStudy landing page.
//!
//! The [`domain`] module holds the session controller and account provisioner
//! behind identity, document store, notification and routing ports. The
//! [`outbound`] module provides Firebase REST adapters plus in-memory and
//! recording doubles, and [`settings`] loads runtime configuration.

pub mod domain;
pub mod outbound;
pub mod settings;

pub use settings::{LandingSettings, SettingsError};
