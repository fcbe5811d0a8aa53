//! Core implementation of the MPR121 driver.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use log::{debug, error};

use crate::reg::{self, Register};
use crate::Mpr121Error;

/// Address with the ADDR pin tied to GND.
pub const DEFAULT_ADDRESS: u8 = 0x5A;

/// Highest selectable address (ADDR tied to SCL).
pub const MAX_ADDRESS: u8 = 0x5D;

/// Number of touch electrodes per chip.
pub const ELECTRODE_COUNT: u8 = 12;

/// Time the chip needs after a soft reset before it accepts configuration.
pub const RESET_SETTLE_MS: u32 = 30;

// --- ECR fields ---
const CALIBRATION_LOCK_BASELINE_TRACKING_AND_INITIALIZE: u8 = 0b11;
const PROXIMITY_DISABLED: u8 = 0b00;
const TOUCH_ELE_0_TO_11: u8 = 0b1100;

/// ECR value for run mode with all twelve electrodes enabled.
pub const ECR_RUN: u8 = (CALIBRATION_LOCK_BASELINE_TRACKING_AND_INITIALIZE << 6)
    | (PROXIMITY_DISABLED << 4)
    | TOUCH_ELE_0_TO_11;

/// ECR value for stop mode. Configuration registers are only writable here.
pub const ECR_STOP: u8 = 0x00;

/// The 16-bit touch status word of one chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchStatus {
    raw: u16,
}

impl TouchStatus {
    /// Bits 0..=11, one per electrode.
    pub const TOUCHED_MASK: u16 = (1 << ELECTRODE_COUNT) - 1;
    const PROXIMITY_BIT: u16 = 1 << 12;
    const OVER_CURRENT_BIT: u16 = 1 << 15;

    /// The word as read from the chip.
    pub fn raw(self) -> u16 {
        self.raw
    }

    /// Bit `i` set means electrode `i` is touched.
    pub fn touched(self) -> u16 {
        self.raw & Self::TOUCHED_MASK
    }

    /// Whether electrode `electrode` is touched. Out of range electrodes never are.
    pub fn is_touched(self, electrode: u8) -> bool {
        electrode < ELECTRODE_COUNT && self.touched() & (1 << electrode) != 0
    }

    /// The proximity (ELEPROX) detection flag.
    pub fn proximity(self) -> bool {
        self.raw & Self::PROXIMITY_BIT != 0
    }

    /// Over-current on the REXT pin. The chip stops measuring until reset.
    pub fn over_current(self) -> bool {
        self.raw & Self::OVER_CURRENT_BIT != 0
    }
}

impl From<u16> for TouchStatus {
    fn from(raw: u16) -> Self {
        Self { raw }
    }
}

/// A driver for one or more MPR121 chips sharing an I2C bus.
///
/// The chip address is passed to every operation, so a single instance drives
/// all boards on the bus and no two transactions can overlap.
pub struct Mpr121<
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
    ErrorType: embedded_hal_async::i2c::Error,
    D: DelayNs,
> {
    i2c: I2cType,
    delay: D,
}

impl<
        I2cType: I2c<SevenBitAddress, Error = ErrorType>,
        ErrorType: embedded_hal_async::i2c::Error,
        D: DelayNs,
    > Mpr121<I2cType, ErrorType, D>
{
    /// Creates a new `Mpr121`.
    ///
    /// # Arguments
    ///
    /// * `i2c` - An I2C peripheral that implements `embedded-hal-async::i2c::I2c`.
    /// * `delay` - A delay provider, used for the post-reset settle time.
    pub fn new(i2c: I2cType, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Gives the bus and the delay provider back.
    pub fn release(self) -> (I2cType, D) {
        (self.i2c, self.delay)
    }

    /// Issues a soft reset and waits [`RESET_SETTLE_MS`].
    pub async fn reset(&mut self, address: u8) -> Result<(), Mpr121Error<ErrorType>> {
        self.write_register(address, reg::SOFT_RESET, reg::SOFT_RESET_VALUE)
            .await?;
        self.delay.delay_ms(RESET_SETTLE_MS).await;
        Ok(())
    }

    /// Writes a single configuration register.
    pub async fn configure(
        &mut self,
        address: u8,
        register: Register,
        value: u8,
    ) -> Result<(), Mpr121Error<ErrorType>> {
        self.write_register(address, register.addr(), value).await
    }

    /// Writes the same touch/release threshold pair to all twelve electrodes.
    pub async fn configure_thresholds(
        &mut self,
        address: u8,
        touch: u8,
        release: u8,
    ) -> Result<(), Mpr121Error<ErrorType>> {
        for electrode in 0..ELECTRODE_COUNT {
            let offset = electrode * reg::THRESHOLD_STRIDE;
            self.write_register(address, Register::E0TTH.addr() + offset, touch)
                .await?;
            self.write_register(address, Register::E0RTH.addr() + offset, release)
                .await?;
        }
        Ok(())
    }

    /// Enters run mode with electrodes 0..=11 enabled and baseline tracking on.
    pub async fn start(&mut self, address: u8) -> Result<(), Mpr121Error<ErrorType>> {
        self.write_register(address, Register::ECR.addr(), ECR_RUN)
            .await
    }

    /// Enters stop mode.
    pub async fn stop(&mut self, address: u8) -> Result<(), Mpr121Error<ErrorType>> {
        self.write_register(address, Register::ECR.addr(), ECR_STOP)
            .await
    }

    /// Reads the little-endian touch status word.
    pub async fn read_touch_status(
        &mut self,
        address: u8,
    ) -> Result<TouchStatus, Mpr121Error<ErrorType>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(address, &[reg::TOUCH_STATUS], &mut buf)
            .await
            .map_err(|err| {
                error!("Error reading touch status from {address:#04x}: {err:?}");
                Mpr121Error::Read(err)
            })?;
        Ok(TouchStatus::from(u16::from_le_bytes(buf)))
    }

    async fn write_register(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), Mpr121Error<ErrorType>> {
        debug!("{address:#04x}: [{register:#04x}] <- {value:#04x}");
        self.i2c
            .write(address, &[register, value])
            .await
            .map_err(|err| {
                error!("Error writing register {register:#04x} on {address:#04x}: {err:?}");
                Mpr121Error::Write(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};
    use std::vec;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        reads: Vec<u8>,
        response: [u8; 2],
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c<SevenBitAddress> for MockI2c {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Bus);
            }
            for operation in operations {
                match operation {
                    Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                    Operation::Read(buf) => {
                        self.reads.push(address);
                        buf.copy_from_slice(&self.response[..buf.len()]);
                    }
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn mpr121() -> Mpr121<MockI2c, ErrorKind, MockDelay> {
        Mpr121::new(MockI2c::default(), MockDelay::default())
    }

    #[test]
    fn test_reset_writes_magic_and_settles() {
        let mut dev = mpr121();
        block_on(dev.reset(0x5B)).unwrap();
        let (i2c, delay) = dev.release();
        assert_eq!(i2c.writes, [(0x5B, vec![0x80, 0x63])]);
        assert_eq!(delay.total_ns, 30_000_000);
    }

    #[test]
    fn test_start_and_stop_write_ecr() {
        let mut dev = mpr121();
        block_on(dev.stop(DEFAULT_ADDRESS)).unwrap();
        block_on(dev.start(DEFAULT_ADDRESS)).unwrap();
        let (i2c, _) = dev.release();
        assert_eq!(
            i2c.writes,
            [(0x5A, vec![0x5E, 0x00]), (0x5A, vec![0x5E, 0xCC])]
        );
    }

    #[test]
    fn test_thresholds_cover_all_electrodes() {
        let mut dev = mpr121();
        block_on(dev.configure_thresholds(0x5C, 60, 20)).unwrap();
        let (i2c, _) = dev.release();
        assert_eq!(i2c.writes.len(), 24);
        assert_eq!(i2c.writes[0], (0x5C, vec![0x41, 60]));
        assert_eq!(i2c.writes[1], (0x5C, vec![0x42, 20]));
        assert_eq!(i2c.writes[22], (0x5C, vec![0x57, 60]));
        assert_eq!(i2c.writes[23], (0x5C, vec![0x58, 20]));
    }

    #[test]
    fn test_read_touch_status_is_little_endian() {
        let mut dev = mpr121();
        dev.i2c.response = [0x01, 0x88];
        let status = block_on(dev.read_touch_status(0x5D)).unwrap();
        assert_eq!(status.raw(), 0x8801);
        assert_eq!(status.touched(), 0x0801);
        assert!(status.is_touched(0));
        assert!(status.is_touched(11));
        assert!(!status.is_touched(12));
        assert!(status.over_current());
        assert!(!status.proximity());

        let (i2c, _) = dev.release();
        assert_eq!(i2c.writes, [(0x5D, vec![0x00])]);
        assert_eq!(i2c.reads, [0x5D]);
    }

    #[test]
    fn test_bus_errors_are_tagged() {
        let mut dev = mpr121();
        dev.i2c.fail = true;
        assert!(matches!(
            block_on(dev.configure(0x5A, Register::DTR, 0x11)),
            Err(Mpr121Error::Write(ErrorKind::Bus))
        ));
        assert!(matches!(
            block_on(dev.read_touch_status(0x5A)),
            Err(Mpr121Error::Read(ErrorKind::Bus))
        ));
    }
}
