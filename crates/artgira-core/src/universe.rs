//! Shared universe snapshots
//!
//! `target` is what the network last delivered, `current` is what the
//! automation system last accepted. Both live behind one lock, shared by the
//! frame receiver and the sync loop.

use parking_lot::{Mutex, MutexGuard};
use std::fmt::Write;

use crate::channels::UNIVERSE_SIZE;

/// Raw values of every slot of one universe
pub type Universe = [u8; UNIVERSE_SIZE];

/// All slots at zero
pub const EMPTY_UNIVERSE: Universe = [0u8; UNIVERSE_SIZE];

/// The snapshot pair guarded by [`SharedUniverse`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseState {
    /// Last state pushed upstream successfully
    pub current: Universe,
    /// Last state received from the network
    pub target: Universe,
}

impl Default for UniverseState {
    fn default() -> Self {
        Self {
            current: EMPTY_UNIVERSE,
            target: EMPTY_UNIVERSE,
        }
    }
}

/// Lock-protected snapshot pair
#[derive(Debug, Default)]
pub struct SharedUniverse {
    state: Mutex<UniverseState>,
}

impl SharedUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock both snapshots. Never hold the guard across an `.await`.
    pub fn lock(&self) -> MutexGuard<'_, UniverseState> {
        self.state.lock()
    }

    /// Copy of the current snapshot
    pub fn current(&self) -> Universe {
        self.state.lock().current
    }

    /// Copy of the target snapshot
    pub fn target(&self) -> Universe {
        self.state.lock().target
    }
}

/// Hex dump with 16 slots per row, prefixed by the row's first offset
pub fn hex_dump(data: &Universe) -> String {
    let mut out = String::with_capacity(UNIVERSE_SIZE * 3 + 32 * 6);
    for (row, chunk) in data.chunks(16).enumerate() {
        let _ = write!(out, "\n{:02x}: ", row * 16);
        for b in chunk {
            let _ = write!(out, "{:02x} ", b);
        }
    }
    out
}
