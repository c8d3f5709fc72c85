//! Art-Net input
//!
//! The bridge acts as an Art-Net node: a console sends ArtDmx for one
//! universe, the node decodes it and passes the frame on.
//!
//! - Uses UDP port 6454
//! - Port-Address is 15 bits: Net (7) + Sub-Net (4) + Universe (4)
//! - Answers ArtPoll so the bridge shows up in console patch dialogs
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use artgira_control::artnet::{ArtNetNode, NodeConfig};
//! use std::net::Ipv4Addr;
//!
//! # async fn run() -> artgira_control::Result<()> {
//! let node = ArtNetNode::bind(NodeConfig::new(Ipv4Addr::new(2, 0, 0, 10), 0, 1)).await?;
//! node.run(|frame| println!("{}/{}: {}", frame.net, frame.sub_uni, frame.data[0]))
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod node;
pub mod packet;

pub use node::{ArtNetNode, NodeConfig};
pub use packet::{ArtNetPacket, NodeInfo, ARTNET_PORT};
