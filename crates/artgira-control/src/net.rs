//! Local interface selection
//!
//! The configured `artnet.network` is an IPv4 CIDR; the node advertises the
//! first local address that falls inside it.

use std::net::Ipv4Addr;

use crate::{error::ControlError, Result};

/// An IPv4 network in CIDR notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Network {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Network {
    /// Parse `a.b.c.d/n`
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || ControlError::InvalidNetwork(s.to_string());

        let (addr, prefix) = s.trim().split_once('/').ok_or_else(invalid)?;
        let addr: Ipv4Addr = addr.parse().map_err(|_| invalid())?;
        let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
        if prefix > 32 {
            return Err(invalid());
        }

        Ok(Self { addr, prefix })
    }

    fn mask(&self) -> u32 {
        match self.prefix {
            0 => 0,
            p => u32::MAX << (32 - p),
        }
    }

    /// Whether `ip` lies inside this network
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        let mask = self.mask();
        u32::from(ip) & mask == u32::from(self.addr) & mask
    }

    /// First candidate inside this network
    pub fn select<I>(&self, candidates: I) -> Option<Ipv4Addr>
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        candidates.into_iter().find(|ip| self.contains(*ip))
    }
}

impl std::fmt::Display for Ipv4Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

/// IPv4 addresses of all local interfaces
pub fn local_ipv4_addrs() -> Result<Vec<Ipv4Addr>> {
    let addrs = nix::ifaddrs::getifaddrs()?
        .filter_map(|ifaddr| {
            ifaddr
                .address
                .and_then(|a| a.as_sockaddr_in().map(|sin| Ipv4Addr::from(sin.ip())))
        })
        .collect();
    Ok(addrs)
}

/// Local address inside `network`, e.g. `"2.0.0.0/8"`
pub fn resolve_interface(network: &str) -> Result<Ipv4Addr> {
    let net = Ipv4Network::parse(network)?;
    net.select(local_ipv4_addrs()?)
        .ok_or_else(|| ControlError::InterfaceNotFound(network.to_string()))
}
