//! Art-Net packet codec (Art-Net 4)
//!
//! Only the three opcodes a receiving node needs: ArtDmx, ArtPoll and
//! ArtPollReply.

use artgira_core::{DmxFrame, Universe, EMPTY_UNIVERSE, UNIVERSE_SIZE};
use std::net::Ipv4Addr;

use crate::{error::ControlError, Result};

/// Packet ID, first 8 bytes of every packet
pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";
/// UDP port used by Art-Net
pub const ARTNET_PORT: u16 = 6454;
/// Protocol revision
pub const PROTOCOL_VERSION: u16 = 14;

pub const OP_POLL: u16 = 0x2000;
pub const OP_POLL_REPLY: u16 = 0x2100;
pub const OP_DMX: u16 = 0x5000;

const DMX_HEADER_LEN: usize = 18;
const POLL_REPLY_LEN: usize = 239;

/// A decoded packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtNetPacket {
    Poll,
    Dmx(DmxFrame),
    /// Valid header, opcode not handled
    Other(u16),
}

/// What a node advertises in its ArtPollReply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub ip: Ipv4Addr,
    pub short_name: String,
    pub long_name: String,
    pub net: u8,
    pub sub_uni: u8,
}

/// Decode a datagram
pub fn decode(buf: &[u8]) -> Result<ArtNetPacket> {
    if buf.len() < 10 || &buf[0..8] != ARTNET_ID {
        return Err(ControlError::InvalidPacket("missing Art-Net header".to_string()));
    }

    // OpCode is little-endian
    let opcode = u16::from_le_bytes([buf[8], buf[9]]);
    match opcode {
        OP_POLL => Ok(ArtNetPacket::Poll),
        OP_DMX => decode_dmx(buf).map(ArtNetPacket::Dmx),
        other => Ok(ArtNetPacket::Other(other)),
    }
}

fn decode_dmx(buf: &[u8]) -> Result<DmxFrame> {
    if buf.len() < DMX_HEADER_LEN {
        return Err(ControlError::InvalidPacket(format!(
            "ArtDmx too short: {} bytes",
            buf.len()
        )));
    }

    // Length is big-endian, 2-512
    let length = u16::from_be_bytes([buf[16], buf[17]]) as usize;
    if !(2..=UNIVERSE_SIZE).contains(&length) {
        return Err(ControlError::InvalidPacket(format!(
            "ArtDmx length {} out of range",
            length
        )));
    }
    let payload = buf.get(DMX_HEADER_LEN..DMX_HEADER_LEN + length).ok_or_else(|| {
        ControlError::InvalidPacket(format!(
            "ArtDmx truncated: declared {} slots, got {}",
            length,
            buf.len() - DMX_HEADER_LEN
        ))
    })?;

    // slots beyond the declared length read as zero
    let mut data: Universe = EMPTY_UNIVERSE;
    data[..length].copy_from_slice(payload);

    Ok(DmxFrame {
        sub_uni: buf[14],
        net: buf[15] & 0x7f,
        data,
    })
}

/// Build an ArtDmx packet carrying a full universe
pub fn encode_dmx(net: u8, sub_uni: u8, sequence: u8, channels: &Universe) -> Vec<u8> {
    let mut packet = vec![0u8; DMX_HEADER_LEN + UNIVERSE_SIZE];

    packet[0..8].copy_from_slice(ARTNET_ID);
    packet[8..10].copy_from_slice(&OP_DMX.to_le_bytes());
    packet[10..12].copy_from_slice(&PROTOCOL_VERSION.to_be_bytes());
    packet[12] = sequence;
    // Physical (0)
    packet[13] = 0;
    packet[14] = sub_uni;
    packet[15] = net & 0x7f;
    packet[16..18].copy_from_slice(&(UNIVERSE_SIZE as u16).to_be_bytes());
    packet[DMX_HEADER_LEN..].copy_from_slice(channels);

    packet
}

/// Build an ArtPoll packet
pub fn encode_poll() -> Vec<u8> {
    let mut packet = vec![0u8; 14];
    packet[0..8].copy_from_slice(ARTNET_ID);
    packet[8..10].copy_from_slice(&OP_POLL.to_le_bytes());
    packet[10..12].copy_from_slice(&PROTOCOL_VERSION.to_be_bytes());
    packet
}

/// Build an ArtPollReply advertising one DMX output port
pub fn encode_poll_reply(info: &NodeInfo) -> Vec<u8> {
    let mut packet = vec![0u8; POLL_REPLY_LEN];

    packet[0..8].copy_from_slice(ARTNET_ID);
    packet[8..10].copy_from_slice(&OP_POLL_REPLY.to_le_bytes());
    packet[10..14].copy_from_slice(&info.ip.octets());
    packet[14..16].copy_from_slice(&ARTNET_PORT.to_le_bytes());

    // VersInfo (firmware revision)
    packet[16..18].copy_from_slice(&1u16.to_be_bytes());

    // NetSwitch, SubSwitch
    packet[18] = info.net & 0x7f;
    packet[19] = (info.sub_uni >> 4) & 0x0f;

    // Status1: indicators normal
    packet[23] = 0xc0;

    write_name(&mut packet[26..44], &info.short_name);
    write_name(&mut packet[44..108], &info.long_name);
    write_name(&mut packet[108..172], "#0001 [0000] Power On Tests successful");

    // NumPorts (big-endian)
    packet[172..174].copy_from_slice(&1u16.to_be_bytes());

    // PortTypes[0]: can output DMX512 from the network
    packet[174] = 0x80;

    // GoodOutput[0]: data being transmitted
    packet[182] = 0x80;

    // SwOut[0]: universe nibble
    packet[190] = info.sub_uni & 0x0f;

    // Style: StNode
    packet[200] = 0x00;

    packet[207..211].copy_from_slice(&info.ip.octets());
    packet[211] = 1;

    // Status2: supports 15-bit Port-Address
    packet[212] = 0x08;

    packet
}

fn write_name(field: &mut [u8], name: &str) {
    // keep the final byte as null terminator
    let bytes = name.as_bytes();
    let len = bytes.len().min(field.len() - 1);
    field[..len].copy_from_slice(&bytes[..len]);
}
