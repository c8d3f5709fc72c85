//! Frame receiver
//!
//! Invoked once per DMX frame delivered by the Art-Net node. Frames for
//! other addresses are dropped; a matching frame replaces `target` as a whole.

use std::sync::Arc;
use tracing::debug;

use crate::universe::{hex_dump, SharedUniverse, Universe};

/// A DMX frame as delivered by the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmxFrame {
    pub net: u8,
    pub sub_uni: u8,
    pub data: Universe,
}

/// Writes matching frames into the shared `target` snapshot
#[derive(Debug, Clone)]
pub struct FrameReceiver {
    net: u8,
    sub_uni: u8,
    universe: Arc<SharedUniverse>,
    dump: bool,
}

impl FrameReceiver {
    pub fn new(net: u8, sub_uni: u8, universe: Arc<SharedUniverse>) -> Self {
        Self {
            net,
            sub_uni,
            universe,
            dump: false,
        }
    }

    /// Print every accepted frame as hex to stdout
    pub fn with_dump(mut self, dump: bool) -> Self {
        self.dump = dump;
        self
    }

    /// Take `frame` if it is addressed to this bridge. Returns whether it was taken.
    pub fn handle_frame(&self, frame: &DmxFrame) -> bool {
        if frame.net != self.net || frame.sub_uni != self.sub_uni {
            debug!("skip {}/{}", frame.net, frame.sub_uni);
            return false;
        }
        debug!("take {}/{}", frame.net, frame.sub_uni);

        let mut state = self.universe.lock();
        state.target = frame.data;
        if self.dump {
            println!("{}", hex_dump(&state.target));
        }
        true
    }
}
