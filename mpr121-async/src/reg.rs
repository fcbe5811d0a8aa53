//! MPR121 register map.
//!
//! Only the registers the driver writes are listed. Names follow the NXP
//! datasheet (AN3891 / MPR121 rev. 4).

/// Touch status, low byte. The high byte follows at `0x01`.
pub const TOUCH_STATUS: u8 = 0x00;

/// Soft reset register. Writing [`SOFT_RESET_VALUE`] resets all registers.
pub const SOFT_RESET: u8 = 0x80;

/// Magic value that triggers a soft reset.
pub const SOFT_RESET_VALUE: u8 = 0x63;

/// Distance between the threshold registers of two neighbouring electrodes.
pub const THRESHOLD_STRIDE: u8 = 2;

/// Configuration registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
pub enum Register {
    // Baseline filter, rising
    MHDR = 0x2B,
    NHDR = 0x2C,
    NCLR = 0x2D,
    FDLR = 0x2E,
    // Baseline filter, falling
    MHDF = 0x2F,
    NHDF = 0x30,
    NCLF = 0x31,
    FDLF = 0x32,
    // Baseline filter, touched
    NHDT = 0x33,
    NCLT = 0x34,
    FDLT = 0x35,

    MHDPROXR = 0x36,
    NHDPROXR = 0x37,
    NCLPROXR = 0x38,
    FDLPROXR = 0x39,
    MHDPROXF = 0x3A,
    NHDPROXF = 0x3B,
    NCLPROXF = 0x3C,
    FDLPROXF = 0x3D,
    NHDPROXT = 0x3E,
    NCLPROXT = 0x3F,
    FDLPROXT = 0x40,

    /// Electrode 0 touch threshold.
    E0TTH = 0x41,
    /// Electrode 0 release threshold.
    E0RTH = 0x42,

    /// Debounce.
    DTR = 0x5B,
    /// Filter / global CDC configuration.
    AFE1 = 0x5C,
    /// Filter / global CDT configuration.
    AFE2 = 0x5D,
    /// Electrode configuration, controls run/stop mode.
    ECR = 0x5E,

    AUTO_CONFIG_0 = 0x7B,
    AUTO_CONFIG_1 = 0x7C,
    /// Auto-configuration upside limit.
    AUTO_CONFIG_USL = 0x7D,
    /// Auto-configuration low side limit.
    AUTO_CONFIG_LSL = 0x7E,
    /// Auto-configuration target level.
    AUTO_CONFIG_TL = 0x7F,
}

impl Register {
    /// The register address on the wire.
    pub fn addr(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> Self {
        register.addr()
    }
}
