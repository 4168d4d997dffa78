//! Outbound adapters implementing the domain ports.
//!
//! - **firebase**: Identity Toolkit and Firestore over REST
//! - **memory**: in-process fakes with failure injection, for tests and demos
//! - **recording** / **tracing_sink**: notification and routing sinks
//!
//! Adapters translate between domain types and wire representations. They
//! contain no business logic.

pub mod firebase;
pub mod memory;
pub mod recording;
pub mod tracing_sink;
