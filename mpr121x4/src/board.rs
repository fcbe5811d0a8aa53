//! Per-board touch state and edge detection.

use crate::handler::{Callbacks, HandlerList, TouchAction};
use crate::sensor::{bit_to_index, Selector, SENSOR_COUNT};

/// Number of MPR121 addresses selectable on one bus.
pub const MAX_BOARDS: usize = 4;

/// A validated board number, 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoardNumber(u8);

impl BoardNumber {
    /// Returns `None` for numbers with no selectable address.
    pub const fn new(number: u8) -> Option<Self> {
        if (number as usize) < MAX_BOARDS {
            Some(Self(number))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All board numbers in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..MAX_BOARDS as u8).map(Self)
    }

    pub(crate) fn slot(self) -> usize {
        usize::from(self.0)
    }
}

impl TryFrom<u8> for BoardNumber {
    type Error = u8;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or(number)
    }
}

/// A single-sensor transition between two consecutive polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The sensor owning this bit was touched.
    Touched(u16),
    /// The sensor owning this bit was released.
    Released(u16),
}

impl Edge {
    /// The status bit of the sensor that changed.
    pub fn bit(self) -> u16 {
        match self {
            Self::Touched(bit) | Self::Released(bit) => bit,
        }
    }

    pub fn action(self) -> TouchAction {
        match self {
            Self::Touched(_) => TouchAction::Touched,
            Self::Released(_) => TouchAction::Released,
        }
    }
}

/// Iterator over the edges between two status words, see [`edges`].
#[derive(Debug, Clone)]
pub struct Edges {
    previous: u16,
    current: u16,
    index: u32,
}

impl Iterator for Edges {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        while self.index < SENSOR_COUNT {
            let bit = 1u16 << self.index;
            self.index += 1;

            let was = self.previous & bit != 0;
            let is = self.current & bit != 0;
            // A release is checked before a touch, but a bit can only do one of them.
            if was && !is {
                return Some(Edge::Released(bit));
            }
            if is && !was {
                return Some(Edge::Touched(bit));
            }
        }
        None
    }
}

/// Edges from `previous` to `current`, in ascending sensor order.
pub fn edges(previous: u16, current: u16) -> Edges {
    Edges {
        previous,
        current,
        index: 0,
    }
}

/// State of one configured board. Only the scan loop writes `status`.
#[derive(Debug)]
pub(crate) struct Board {
    pub(crate) address: u8,
    status: u16,
    last_event: u16,
    unread_touch: bool,
    on_touched: HandlerList,
    on_released: HandlerList,
}

impl Board {
    pub(crate) fn new(address: u8) -> Self {
        Self {
            address,
            status: 0,
            last_event: 0,
            unread_touch: false,
            on_touched: HandlerList::default(),
            on_released: HandlerList::default(),
        }
    }

    pub(crate) fn handlers_mut(&mut self, action: TouchAction) -> &mut HandlerList {
        match action {
            TouchAction::Touched => &mut self.on_touched,
            TouchAction::Released => &mut self.on_released,
        }
    }

    /// Stores `current` and returns the previous status if it differs.
    pub(crate) fn update_status(&mut self, current: u16) -> Option<u16> {
        if current == self.status {
            return None;
        }
        Some(core::mem::replace(&mut self.status, current))
    }

    /// Records `edge` as the latest event and resolves the callbacks to run.
    pub(crate) fn record(&mut self, edge: Edge) -> Callbacks {
        self.last_event = edge.bit();
        match edge {
            Edge::Released(bit) => self.on_released.matching(bit),
            Edge::Touched(bit) => {
                self.unread_touch = true;
                self.on_touched.matching(bit)
            }
        }
    }

    pub(crate) fn status(&self) -> u16 {
        self.status
    }

    #[cfg(test)]
    pub(crate) fn last_event(&self) -> u16 {
        self.last_event
    }

    pub(crate) fn is_touched(&self, selector: Selector) -> bool {
        match selector {
            Selector::Any => self.status != 0,
            Selector::Sensor(_) => u32::from(self.status) & selector.mask() != 0,
        }
    }

    pub(crate) fn last_touched_index(&self) -> Option<u8> {
        if self.last_event == 0 {
            return None;
        }
        bit_to_index(u32::from(self.last_event)).map(|index| index as u8)
    }

    pub(crate) fn take_unread_touch(&mut self) -> bool {
        core::mem::replace(&mut self.unread_touch, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn test_board_number_range() {
        assert_eq!(BoardNumber::new(3).map(BoardNumber::get), Some(3));
        assert_eq!(BoardNumber::new(4), None);
        assert_eq!(BoardNumber::try_from(200), Err(200));
        assert_eq!(BoardNumber::all().count(), MAX_BOARDS);
    }

    #[test]
    fn test_edges_single_touch() {
        let found: Vec<Edge> = edges(0b0000, 0b0001).collect();
        assert_eq!(found, [Edge::Touched(0b0001)]);
    }

    #[test]
    fn test_edges_single_release() {
        let found: Vec<Edge> = edges(0b0001, 0b0000).collect();
        assert_eq!(found, [Edge::Released(0b0001)]);
    }

    #[test]
    fn test_edges_none_when_unchanged() {
        assert_eq!(edges(0b0101, 0b0101).count(), 0);
    }

    #[test]
    fn test_edges_are_bit_major() {
        let found: Vec<Edge> = edges(0b0110, 0b1001).collect();
        assert_eq!(
            found,
            [
                Edge::Touched(0b0001),
                Edge::Released(0b0010),
                Edge::Released(0b0100),
                Edge::Touched(0b1000),
            ]
        );
    }

    #[test]
    fn test_edges_ignore_upper_bits() {
        assert_eq!(edges(0, 0xF000).count(), 0);
        let found: Vec<Edge> = edges(0, 0x0800).collect();
        assert_eq!(found, [Edge::Touched(0x0800)]);
    }

    #[test]
    fn test_record_keeps_single_bit() {
        let mut board = Board::new(0x5A);
        assert_eq!(board.update_status(0b0011), Some(0));
        for edge in edges(0, 0b0011) {
            board.record(edge);
            assert_eq!(board.last_event().count_ones(), 1);
        }
        assert_eq!(board.last_event(), 0b0010);
        assert_eq!(board.last_touched_index(), Some(1));
        assert_eq!(board.update_status(0b0011), None);
    }

    #[test]
    fn test_release_leaves_unread_flag() {
        let mut board = Board::new(0x5A);
        board.update_status(0b0001);
        board.record(Edge::Released(0b0001));
        assert!(!board.take_unread_touch());
        board.record(Edge::Touched(0b0001));
        assert!(board.take_unread_touch());
        assert!(!board.take_unread_touch());
    }

    #[test]
    fn test_is_touched() {
        let mut board = Board::new(0x5A);
        assert!(!board.is_touched(Selector::Any));
        board.update_status(0b1000_0000_0000);
        assert!(board.is_touched(Selector::Any));
        assert!(board.is_touched(Selector::Sensor(11)));
        assert!(!board.is_touched(Selector::Sensor(0)));
        assert!(!board.is_touched(Selector::Sensor(12)));
        assert_eq!(board.status(), 0x0800);
    }
}
