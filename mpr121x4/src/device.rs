//! The seam between the touch engine and the chip protocol.

use core::fmt::Debug;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use mpr121_async::reg::Register;
use mpr121_async::{Mpr121, Mpr121Error, TouchStatus};

/// Register-level access to the touch controllers on one bus.
///
/// Every call names the chip address. The registry holds the device behind a
/// mutex, so implementations never see overlapping calls.
#[allow(async_fn_in_trait)]
pub trait TouchDevice {
    /// Bus or device error.
    type Error: Debug;

    /// Soft reset, including the settle delay.
    async fn reset(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Writes a single configuration register.
    async fn configure(
        &mut self,
        address: u8,
        register: Register,
        value: u8,
    ) -> Result<(), Self::Error>;

    /// Writes one touch/release threshold pair to all electrodes.
    async fn configure_thresholds(
        &mut self,
        address: u8,
        touch: u8,
        release: u8,
    ) -> Result<(), Self::Error>;

    /// Enables capture.
    async fn start(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Disables capture.
    async fn stop(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Latches and reads the touch status word.
    async fn read_status(&mut self, address: u8) -> Result<TouchStatus, Self::Error>;
}

impl<I2cType, ErrorType, D> TouchDevice for Mpr121<I2cType, ErrorType, D>
where
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
    ErrorType: embedded_hal_async::i2c::Error,
    D: DelayNs,
{
    type Error = Mpr121Error<ErrorType>;

    async fn reset(&mut self, address: u8) -> Result<(), Self::Error> {
        Mpr121::reset(self, address).await
    }

    async fn configure(
        &mut self,
        address: u8,
        register: Register,
        value: u8,
    ) -> Result<(), Self::Error> {
        Mpr121::configure(self, address, register, value).await
    }

    async fn configure_thresholds(
        &mut self,
        address: u8,
        touch: u8,
        release: u8,
    ) -> Result<(), Self::Error> {
        Mpr121::configure_thresholds(self, address, touch, release).await
    }

    async fn start(&mut self, address: u8) -> Result<(), Self::Error> {
        Mpr121::start(self, address).await
    }

    async fn stop(&mut self, address: u8) -> Result<(), Self::Error> {
        Mpr121::stop(self, address).await
    }

    async fn read_status(&mut self, address: u8) -> Result<TouchStatus, Self::Error> {
        self.read_touch_status(address).await
    }
}
