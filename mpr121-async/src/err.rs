//! Error types for the MPR121 driver.

use core::fmt::{self, Debug};

/// An error related to I2C communication with an MPR121.
pub enum Mpr121Error<TI2CERR> {
    /// An error occurred while writing a register.
    Write(TI2CERR),
    /// An error occurred while reading the touch status.
    Read(TI2CERR),
}

impl<TI2CERR: Debug> Debug for Mpr121Error<TI2CERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(err) => write!(f, "Write({err:?})"),
            Self::Read(err) => write!(f, "Read({err:?})"),
        }
    }
}
