//! Automation server clients
//!
//! - [`RestClient`]: talks to the server's REST API
//! - [`FakeClient`]: serves a UI configuration file, no network

pub mod client;
pub mod fake;

pub use client::RestClient;
pub use fake::FakeClient;
