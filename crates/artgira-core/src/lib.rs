//! ArtGira Core - Channel Mapping and Synchronization
//!
//! This crate maps the data points of a home-automation server onto a DMX
//! universe and keeps the server in sync with what a lighting console sends:
//! - **Channel table**: functions and data points laid out as DMX slots
//! - **Diff engine**: changed slots as automation values, with derived on/off
//! - **Frame receiver**: accepts frames for one Art-Net address into `target`
//! - **Sync loop**: pushes `target` upstream and commits it as `current`
//!
//! ## Quick Start
//!
//! ```rust
//! use artgira_core::{build_channel_table, diff, BuildOptions, UiConfig, EMPTY_UNIVERSE};
//!
//! # fn main() -> artgira_core::Result<()> {
//! let ui: UiConfig = serde_json::from_str(r#"{
//!     "functions": [{
//!         "uid": "a001",
//!         "channelType": "de.gira.schema.channels.KNX.Dimmer",
//!         "displayName": "Kitchen",
//!         "dataPoints": [{ "name": "Brightness", "uid": "a002" }]
//!     }]
//! }"#)?;
//!
//! let layout = build_channel_table(&ui, &BuildOptions::default())?;
//!
//! let mut target = EMPTY_UNIVERSE;
//! target[0] = 255;
//! let body = diff(&layout.table, &EMPTY_UNIVERSE, &target).unwrap();
//! assert_eq!(body.values[0].value, "100");
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]

// Data model
pub mod config;
pub mod error;
pub mod uiconfig;
pub mod values;

// Mapping and synchronization
pub mod builder;
pub mod channels;
pub mod client;
pub mod diff;
pub mod receiver;
pub mod sync;
pub mod universe;

// Re-exports
pub use builder::{build_channel_table, BuildOptions, ChannelLayout};
pub use channels::{Channel, ChannelTable, Fixture, OnOffGroup, ON_OFF, UNIVERSE_SIZE};
pub use client::AutomationClient;
pub use config::{ArtNetConfig, Config};
pub use diff::{diff, dmx_to_percent};
pub use error::{CoreError, Result};
pub use receiver::{DmxFrame, FrameReceiver};
pub use sync::{SyncEngine, TickOutcome};
pub use uiconfig::{ChannelType, DataPoint, Function, UiConfig};
pub use universe::{hex_dump, SharedUniverse, Universe, UniverseState, EMPTY_UNIVERSE};
pub use values::{Value, ValueBody};
