//! An asynchronous, `no_std` driver for the NXP MPR121 capacitive touch controller.
//!
//! The MPR121 exposes twelve electrodes and answers on one of four I2C addresses
//! (`0x5A`..=`0x5D`) selected by the ADDR pin. This crate speaks the register
//! protocol only: soft reset, filter and threshold configuration, run/stop mode
//! and the touch status read. A single [`Mpr121`] owns the bus and addresses every
//! chip on it, so several boards can be driven through one instance.
//!
//! # Usage
//!
//! ```ignore
//! # #![no_std]
//! # #![no_main]
//! # use esp_hal::i2c::master::I2c;
//! # use esp_hal::Config;
//! # use esp_hal::clock::CpuClock;
//! # use esp_hal::time::Rate;
//! # use embassy_executor::Spawner;
//! # use embassy_time::Delay;
//! use mpr121_async::{conf::Config as TouchConfig, Mpr121, DEFAULT_ADDRESS};
//!
//! #[esp_hal_embassy::main]
//! async fn main(_spawner: Spawner) {
//!     let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
//!     let config = esp_hal::i2c::master::Config::default().with_frequency(Rate::from_khz(100));
//!     let i2c = I2c::new(peripherals.I2C0, config)
//!         .unwrap()
//!         .with_sda(peripherals.GPIO13)
//!         .with_scl(peripherals.GPIO14)
//!         .into_async();
//!
//!     let mut mpr121 = Mpr121::new(i2c, Delay);
//!     let conf = TouchConfig::default();
//!     mpr121.reset(DEFAULT_ADDRESS).await.unwrap();
//!     mpr121.stop(DEFAULT_ADDRESS).await.unwrap();
//!     for (register, value) in conf.registers() {
//!         mpr121.configure(DEFAULT_ADDRESS, register, value).await.unwrap();
//!     }
//!     mpr121
//!         .configure_thresholds(DEFAULT_ADDRESS, conf.thresholds.touch, conf.thresholds.release)
//!         .await
//!         .unwrap();
//!     mpr121.start(DEFAULT_ADDRESS).await.unwrap();
//!
//!     let status = mpr121.read_touch_status(DEFAULT_ADDRESS).await.unwrap();
//!     // log::info!("touched electrodes: {:012b}", status.touched());
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod conf;
pub mod reg;

mod err;
mod mpr121;

pub use err::Mpr121Error;
pub use mpr121::*;
