//! Art-Net receiving node
//!
//! Listens for ArtDmx and ArtPoll on one UDP socket. DMX frames are handed
//! to a callback as they arrive; polls are answered with an ArtPollReply so
//! consoles can discover the bridge.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use artgira_core::DmxFrame;
use tokio::net::UdpSocket;
use tracing::{debug, info, trace, warn};

use super::packet::{self, ArtNetPacket, NodeInfo, ARTNET_PORT};
use crate::Result;

/// Pause after a failed receive before trying again
const RECV_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Art-Net node configuration
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Socket address to listen on
    pub bind: SocketAddr,
    /// Address advertised in poll replies
    pub ip: Ipv4Addr,
    pub short_name: String,
    pub long_name: String,
    pub net: u8,
    pub sub_uni: u8,
}

impl NodeConfig {
    /// Listen on all interfaces, port 6454
    pub fn new(ip: Ipv4Addr, net: u8, sub_uni: u8) -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, ARTNET_PORT)),
            ip,
            short_name: "gira-x1".to_string(),
            long_name: "GIRA bridge".to_string(),
            net,
            sub_uni,
        }
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    fn node_info(&self) -> NodeInfo {
        NodeInfo {
            ip: self.ip,
            short_name: self.short_name.clone(),
            long_name: self.long_name.clone(),
            net: self.net,
            sub_uni: self.sub_uni,
        }
    }
}

/// A bound Art-Net node
pub struct ArtNetNode {
    socket: UdpSocket,
    config: NodeConfig,
}

impl ArtNetNode {
    /// Bind the node's socket
    pub async fn bind(config: NodeConfig) -> Result<Self> {
        let socket = UdpSocket::bind(config.bind).await?;
        socket.set_broadcast(true)?;

        info!(
            "Art-Net node {:?} listening on {} (advertising {}, net {} sub-uni {})",
            config.long_name,
            socket.local_addr()?,
            config.ip,
            config.net,
            config.sub_uni
        );

        Ok(Self { socket, config })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive forever. Every ArtDmx is passed to `on_dmx`, whatever its
    /// address; filtering is up to the callback. Receive errors are logged
    /// and do not stop the node.
    pub async fn run<F>(&self, on_dmx: F)
    where
        F: Fn(&DmxFrame),
    {
        let mut buf = [0u8; 1024];

        loop {
            let (len, from) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    warn!("Art-Net receive failed: {}", e);
                    tokio::time::sleep(RECV_RETRY_DELAY).await;
                    continue;
                }
            };

            match packet::decode(&buf[..len]) {
                Ok(ArtNetPacket::Dmx(frame)) => on_dmx(&frame),
                Ok(ArtNetPacket::Poll) => self.reply_poll(from).await,
                Ok(ArtNetPacket::Other(opcode)) => {
                    trace!("ignoring opcode {:#06x} from {}", opcode, from);
                }
                Err(e) => debug!("dropping datagram from {}: {}", from, e),
            }
        }
    }

    async fn reply_poll(&self, to: SocketAddr) {
        let reply = packet::encode_poll_reply(&self.config.node_info());
        match self.socket.send_to(&reply, to).await {
            Ok(_) => debug!("sent ArtPollReply to {}", to),
            Err(e) => warn!("could not answer ArtPoll from {}: {}", to, e),
        }
    }
}
