//! Filter, debounce and threshold configuration for the MPR121.

use crate::reg::Register;

/// Number of register writes produced by [`Config::registers`].
pub const CONFIG_REGISTER_COUNT: usize = 30;

/// Baseline filter parameters for a rising or falling signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineFilter {
    /// Maximum half delta (MHD).
    pub max_half_delta: u8,
    /// Noise half delta (NHD).
    pub noise_half_delta: u8,
    /// Noise count limit (NCL).
    pub noise_count_limit: u8,
    /// Filter delay count limit (FDL).
    pub filter_delay_limit: u8,
}

/// Baseline filter parameters while an electrode is touched. There is no MHD here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchedFilter {
    /// Noise half delta (NHD).
    pub noise_half_delta: u8,
    /// Noise count limit (NCL).
    pub noise_count_limit: u8,
    /// Filter delay count limit (FDL).
    pub filter_delay_limit: u8,
}

/// Auto-configuration (charge current and time search) parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfig {
    /// Auto-configuration control register 0.
    pub control_0: u8,
    /// Auto-configuration control register 1.
    pub control_1: u8,
    /// Upside limit.
    pub upper_limit: u8,
    /// Low side limit.
    pub lower_limit: u8,
    /// Target level.
    pub target_level: u8,
}

/// Touch and release thresholds, applied identically to all twelve electrodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Touch threshold.
    pub touch: u8,
    /// Release threshold.
    pub release: u8,
}

/// Configuration parameters written to an MPR121 while it is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Filter for a rising electrode signal.
    pub rising: BaselineFilter,
    /// Filter for a falling electrode signal.
    pub falling: BaselineFilter,
    /// Filter while touched.
    pub touched: TouchedFilter,
    /// Proximity filter, rising. Proximity detection stays disabled.
    pub proximity_rising: BaselineFilter,
    /// Proximity filter, falling.
    pub proximity_falling: BaselineFilter,
    /// Proximity filter while touched.
    pub proximity_touched: TouchedFilter,
    /// Debounce register, mostly relevant for the IRQ line.
    pub debounce: u8,
    /// AFE1: first filter iterations and global charge current.
    pub afe1: u8,
    /// AFE2: charge time, second filter iterations and sample interval.
    pub afe2: u8,
    /// Auto-configuration parameters.
    pub auto_config: AutoConfig,
    /// Default sensitivity.
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rising: BaselineFilter {
                max_half_delta: 0x01,
                noise_half_delta: 0x01,
                noise_count_limit: 0x10,
                filter_delay_limit: 0x20,
            },
            falling: BaselineFilter {
                max_half_delta: 0x01,
                noise_half_delta: 0x01,
                noise_count_limit: 0x10,
                filter_delay_limit: 0x20,
            },
            touched: TouchedFilter {
                noise_half_delta: 0x01,
                noise_count_limit: 0x10,
                filter_delay_limit: 0xFF,
            },
            proximity_rising: BaselineFilter {
                max_half_delta: 0x0F,
                noise_half_delta: 0x0F,
                noise_count_limit: 0x00,
                filter_delay_limit: 0x00,
            },
            proximity_falling: BaselineFilter {
                max_half_delta: 0x01,
                noise_half_delta: 0x01,
                noise_count_limit: 0xFF,
                filter_delay_limit: 0xFF,
            },
            proximity_touched: TouchedFilter {
                noise_half_delta: 0x00,
                noise_count_limit: 0x00,
                filter_delay_limit: 0x00,
            },
            debounce: 0x11,
            afe1: 0xFF,
            afe2: 0x30,
            auto_config: AutoConfig {
                control_0: 0x00,
                control_1: 0x00,
                upper_limit: 0x00,
                lower_limit: 0x00,
                target_level: 0x00,
            },
            thresholds: Thresholds {
                touch: 60,
                release: 20,
            },
        }
    }
}

impl Config {
    /// Returns the register writes for this configuration, in the order they
    /// must be issued: rising, falling and touched filters, the proximity
    /// filters, debounce, AFE and finally auto-configuration.
    ///
    /// Thresholds are not part of this list; they are written per electrode.
    pub fn registers(&self) -> [(Register, u8); CONFIG_REGISTER_COUNT] {
        use Register::*;

        [
            (MHDR, self.rising.max_half_delta),
            (NHDR, self.rising.noise_half_delta),
            (NCLR, self.rising.noise_count_limit),
            (FDLR, self.rising.filter_delay_limit),
            (MHDF, self.falling.max_half_delta),
            (NHDF, self.falling.noise_half_delta),
            (NCLF, self.falling.noise_count_limit),
            (FDLF, self.falling.filter_delay_limit),
            (NHDT, self.touched.noise_half_delta),
            (NCLT, self.touched.noise_count_limit),
            (FDLT, self.touched.filter_delay_limit),
            (MHDPROXR, self.proximity_rising.max_half_delta),
            (NHDPROXR, self.proximity_rising.noise_half_delta),
            (NCLPROXR, self.proximity_rising.noise_count_limit),
            (FDLPROXR, self.proximity_rising.filter_delay_limit),
            (MHDPROXF, self.proximity_falling.max_half_delta),
            (NHDPROXF, self.proximity_falling.noise_half_delta),
            (NCLPROXF, self.proximity_falling.noise_count_limit),
            (FDLPROXF, self.proximity_falling.filter_delay_limit),
            (NHDPROXT, self.proximity_touched.noise_half_delta),
            (NCLPROXT, self.proximity_touched.noise_count_limit),
            (FDLPROXT, self.proximity_touched.filter_delay_limit),
            (DTR, self.debounce),
            (AFE1, self.afe1),
            (AFE2, self.afe2),
            (AUTO_CONFIG_0, self.auto_config.control_0),
            (AUTO_CONFIG_1, self.auto_config.control_1),
            (AUTO_CONFIG_USL, self.auto_config.upper_limit),
            (AUTO_CONFIG_LSL, self.auto_config.lower_limit),
            (AUTO_CONFIG_TL, self.auto_config.target_level),
        ]
    }
}
