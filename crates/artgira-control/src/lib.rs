//! ArtGira Control - Network Collaborators
//!
//! This crate connects the bridge core to the outside world:
//! - **Art-Net**: a receiving node that decodes ArtDmx and answers ArtPoll
//! - **REST**: client for the automation server, plus an offline fake
//! - **Net**: picks the local interface for the configured network
//!
//! ## Modules
//!
//! - [`artnet`] - Art-Net node and packet codec
//! - [`rest`] - Automation server clients
//! - [`net`] - Interface resolution
//! - [`error`] - Error types

#![allow(missing_docs)]

pub mod artnet;
pub mod error;
pub mod net;
pub mod rest;

pub use artnet::{ArtNetNode, NodeConfig};
pub use error::{ControlError, Result};
pub use net::{resolve_interface, Ipv4Network};
pub use rest::{FakeClient, RestClient};
