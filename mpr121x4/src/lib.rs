//! Edge-triggered touch events for up to four MPR121 boards on one I2C bus.
//!
//! A [`TouchRegistry`] owns the bus driver and the state of every board. Boards
//! are configured lazily, the first time a handler is registered or a query names
//! them. Board `n` answers on `0x5A + n`, so the chips must be strapped to
//! consecutive addresses.
//!
//! The registry's [`run`](TouchRegistry::run) future is the scan loop: it polls
//! every configured board, diffs the 12-bit status word against the previous one
//! and calls the touch/release handlers of each changed sensor in ascending
//! order. Queries ([`is_touched`](TouchRegistry::is_touched),
//! [`last_touched_index`](TouchRegistry::last_touched_index),
//! [`consume_unread_touch`](TouchRegistry::consume_unread_touch)) reflect the
//! loop's latest writes.
//!
//! # Usage
//!
//! ```ignore
//! # #![no_std]
//! # #![no_main]
//! # use esp_hal::i2c::master::I2c;
//! # use esp_hal::{Async, Config};
//! # use esp_hal::clock::CpuClock;
//! # use esp_hal::time::Rate;
//! # use embassy_executor::Spawner;
//! # use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! # use embassy_time::Delay;
//! # use static_cell::StaticCell;
//! use mpr121_async::Mpr121;
//! use mpr121x4::{Selector, TouchConfig, TouchRegistry};
//!
//! type Registry = TouchRegistry<
//!     CriticalSectionRawMutex,
//!     Mpr121<I2c<'static, Async>, esp_hal::i2c::master::Error, Delay>,
//! >;
//!
//! static REGISTRY: StaticCell<Registry> = StaticCell::new();
//!
//! fn on_pad_touched() {
//!     // log::info!("pad touched");
//! }
//!
//! #[esp_hal_embassy::main]
//! async fn main(spawner: Spawner) {
//!     let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
//!     let config = esp_hal::i2c::master::Config::default().with_frequency(Rate::from_khz(100));
//!     let i2c = I2c::new(peripherals.I2C0, config)
//!         .unwrap()
//!         .with_sda(peripherals.GPIO13)
//!         .with_scl(peripherals.GPIO14)
//!         .into_async();
//!
//!     let registry: &'static Registry =
//!         REGISTRY.init(TouchRegistry::new(Mpr121::new(i2c, Delay), TouchConfig::default()));
//!     spawner.spawn(scan(registry)).unwrap();
//!
//!     registry
//!         .register_touch(0, Selector::Sensor(3), &on_pad_touched)
//!         .await
//!         .unwrap();
//! }
//!
//! #[embassy_executor::task]
//! async fn scan(registry: &'static Registry) {
//!     if let Err(err) = registry.run(Delay).await {
//!         // log::error!("Touch scanner failed: {err:?}");
//!     }
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod board;
pub mod config;
pub mod device;
pub mod handler;
pub mod sensor;

mod error;
mod registry;
mod scan;

#[cfg(test)]
mod testing;

pub use board::{BoardNumber, Edge, MAX_BOARDS};
pub use config::TouchConfig;
pub use device::TouchDevice;
pub use error::Error;
pub use handler::{Callback, TouchAction, MAX_HANDLERS};
pub use registry::TouchRegistry;
pub use sensor::{bit_to_index, bit_to_index as sensor_index, index_to_bit, Selector, ANY, SENSOR_COUNT};
