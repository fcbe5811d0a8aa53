//! Test doubles: a recording touch device and a callback recorder.

use std::boxed::Box;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal_async::delay::DelayNs;
use mpr121_async::reg::Register;
use mpr121_async::TouchStatus;

use crate::{Callback, TouchConfig, TouchDevice, TouchRegistry};

pub(crate) type Registry = TouchRegistry<CriticalSectionRawMutex, MockDevice>;

pub(crate) fn registry() -> (Registry, MockDevice) {
    let device = MockDevice::default();
    (
        TouchRegistry::new(device.clone(), TouchConfig::default()),
        device,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Reset(u8),
    Configure(u8, Register, u8),
    Thresholds(u8, u8, u8),
    Start(u8),
    Stop(u8),
    Read(u8),
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MockError;

#[derive(Default)]
struct Bus {
    calls: Vec<Call>,
    status: HashMap<u8, u16>,
    fail_writes: bool,
    fail_reads: bool,
    yield_writes: bool,
}

/// A touch device whose status words are set by the test.
#[derive(Clone, Default)]
pub(crate) struct MockDevice {
    bus: Arc<Mutex<Bus>>,
}

impl MockDevice {
    pub(crate) fn set_status(&self, address: u8, status: u16) {
        self.bus.lock().unwrap().status.insert(address, status);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.bus.lock().unwrap().fail_writes = fail;
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.bus.lock().unwrap().fail_reads = fail;
    }

    /// Makes every write suspend once before it reaches the bus.
    pub(crate) fn yield_writes(&self, yielding: bool) {
        self.bus.lock().unwrap().yield_writes = yielding;
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.bus.lock().unwrap().calls.clone()
    }

    pub(crate) fn resets(&self, address: u8) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == Call::Reset(address))
            .count()
    }

    pub(crate) fn reads(&self) -> Vec<u8> {
        self.calls()
            .iter()
            .filter_map(|call| match call {
                Call::Read(address) => Some(*address),
                _ => None,
            })
            .collect()
    }

    async fn write(&self, call: Call) -> Result<(), MockError> {
        let yielding = self.bus.lock().unwrap().yield_writes;
        if yielding {
            yield_now().await;
        }
        let mut bus = self.bus.lock().unwrap();
        bus.calls.push(call);
        if bus.fail_writes {
            return Err(MockError);
        }
        Ok(())
    }
}

impl TouchDevice for MockDevice {
    type Error = MockError;

    async fn reset(&mut self, address: u8) -> Result<(), MockError> {
        self.write(Call::Reset(address)).await
    }

    async fn configure(&mut self, address: u8, register: Register, value: u8) -> Result<(), MockError> {
        self.write(Call::Configure(address, register, value)).await
    }

    async fn configure_thresholds(
        &mut self,
        address: u8,
        touch: u8,
        release: u8,
    ) -> Result<(), MockError> {
        self.write(Call::Thresholds(address, touch, release)).await
    }

    async fn start(&mut self, address: u8) -> Result<(), MockError> {
        self.write(Call::Start(address)).await
    }

    async fn stop(&mut self, address: u8) -> Result<(), MockError> {
        self.write(Call::Stop(address)).await
    }

    async fn read_status(&mut self, address: u8) -> Result<TouchStatus, MockError> {
        let mut bus = self.bus.lock().unwrap();
        if bus.fail_reads {
            return Err(MockError);
        }
        bus.calls.push(Call::Read(address));
        Ok(TouchStatus::from(
            bus.status.get(&address).copied().unwrap_or(0),
        ))
    }
}

pub(crate) struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}

/// A delay that hands control back to the executor once.
pub(crate) struct YieldDelay;

impl DelayNs for YieldDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        yield_now().await;
    }
}

/// Suspends `count` times, then completes.
pub(crate) async fn yields(count: usize) {
    for _ in 0..count {
        yield_now().await;
    }
}

/// Hands out callbacks that append a tag to a shared log.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl Recorder {
    pub(crate) fn callback(&self, tag: &'static str) -> Callback {
        let log = self.log.clone();
        Box::leak(Box::new(move || log.lock().unwrap().push(tag)))
    }

    pub(crate) fn take(&self) -> Vec<&'static str> {
        core::mem::take(&mut *self.log.lock().unwrap())
    }
}
