//! Registry configuration.

use mpr121_async::{conf::Config, DEFAULT_ADDRESS};

use crate::board::BoardNumber;

const MAX_I2C_ADDRESS: u8 = 0x7F;

/// Configuration shared by all boards of a [`TouchRegistry`](crate::TouchRegistry).
#[derive(Debug, Clone)]
pub struct TouchConfig {
    /// Address of board 0. Board `n` answers on `base_address + n`, so the chips
    /// must be strapped to consecutive addresses. A board whose address would
    /// leave the 7-bit range cannot be used.
    pub base_address: u8,
    /// Filter, debounce and threshold settings written to every board.
    pub device: Config,
    /// Pause between two scans of all boards.
    pub poll_interval_ms: u32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_ADDRESS,
            device: Config::default(),
            poll_interval_ms: 20,
        }
    }
}

impl TouchConfig {
    /// The bus address of `board`, `None` past the 7-bit address range.
    pub fn address(&self, board: BoardNumber) -> Option<u8> {
        self.base_address
            .checked_add(board.get())
            .filter(|address| *address <= MAX_I2C_ADDRESS)
    }
}
