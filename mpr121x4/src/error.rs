//! Error type of the touch registry.

use core::fmt::{self, Debug};

use crate::board::BoardNumber;
use crate::sensor::Selector;

/// Errors returned by [`TouchRegistry`](crate::TouchRegistry).
pub enum Error<TDEVERR> {
    /// The board number has no address on the bus (valid: 0..=3, and
    /// `base_address + n` must fit in seven bits).
    InvalidBoard(u8),
    /// The selector names no sensor.
    InvalidSensor(Selector),
    /// The board already holds `MAX_HANDLERS` handlers for this action.
    HandlerListFull(BoardNumber),
    /// The board is not in the registry.
    Uninitialized(BoardNumber),
    /// `run` was called while another scan loop is active.
    ScannerRunning,
    /// The device driver failed.
    Device(TDEVERR),
}

impl<TDEVERR: Debug> Debug for Error<TDEVERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBoard(board) => write!(f, "InvalidBoard({board})"),
            Self::InvalidSensor(selector) => write!(f, "InvalidSensor({selector:?})"),
            Self::HandlerListFull(board) => write!(f, "HandlerListFull({})", board.get()),
            Self::Uninitialized(board) => write!(f, "Uninitialized({})", board.get()),
            Self::ScannerRunning => write!(f, "ScannerRunning"),
            Self::Device(err) => write!(f, "Device({err:?})"),
        }
    }
}
