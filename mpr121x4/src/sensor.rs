//! Mapping between sensor indices and bits of the status word.
//!
//! Sensor `i` (0..=11) owns bit `1 << i`. [`ANY`] is a sentinel that lies outside
//! the status word and stands for "every sensor" in both directions.

use mpr121_async::ELECTRODE_COUNT;

/// Electrodes per board.
pub const SENSOR_COUNT: u32 = ELECTRODE_COUNT as u32;

/// Wildcard sentinel, used both as an index and as a mask.
pub const ANY: u32 = 1 << 30;

/// Mask returned for an index that names no sensor.
pub const NO_SENSOR: u32 = 0;

/// Returns the status bit of sensor `index`, [`ANY`] for [`ANY`] and
/// [`NO_SENSOR`] for anything else.
pub const fn index_to_bit(index: u32) -> u32 {
    if index < SENSOR_COUNT {
        1 << index
    } else if index == ANY {
        ANY
    } else {
        NO_SENSOR
    }
}

/// Returns the lowest sensor index whose bit is set in `mask`, [`ANY`] for [`ANY`]
/// and `None` when no sensor bit is set.
pub fn bit_to_index(mask: u32) -> Option<u32> {
    if mask == ANY {
        return Some(ANY);
    }
    (0..SENSOR_COUNT).find(|&index| mask & (1 << index) != 0)
}

/// Which sensor(s) a handler or a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// A single sensor. Indices above 11 select nothing.
    Sensor(u8),
    /// Every sensor on the board.
    Any,
}

impl Selector {
    /// Builds a selector from a raw index, [`ANY`] included.
    ///
    /// Returns `None` for indices that map to no sensor.
    pub fn from_index(index: u32) -> Option<Self> {
        match index_to_bit(index) {
            NO_SENSOR => None,
            ANY => Some(Self::Any),
            _ => Some(Self::Sensor(index as u8)),
        }
    }

    /// The selector as a mask: one status bit, [`ANY`] or [`NO_SENSOR`].
    pub fn mask(self) -> u32 {
        match self {
            Self::Sensor(index) => index_to_bit(u32::from(index)),
            Self::Any => ANY,
        }
    }

    /// Whether an edge on `bit` concerns this selector.
    pub fn matches(self, bit: u16) -> bool {
        match self {
            Self::Any => true,
            Self::Sensor(_) => self.mask() == u32::from(bit),
        }
    }
}
