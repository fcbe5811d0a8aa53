//! The polling loop that turns status words into touch and release events.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use log::{debug, error, warn};

use crate::board::{edges, BoardNumber};
use crate::device::TouchDevice;
use crate::error::Error;
use crate::handler::fire;
use crate::registry::TouchRegistry;

impl<M: RawMutex, D: TouchDevice> TouchRegistry<M, D> {
    /// Polls all boards forever.
    ///
    /// Waits until the first board has been configured, then calls
    /// [`scan_once`](Self::scan_once) every `poll_interval_ms`. Handlers run
    /// inside this future, so a callback that blocks stalls every board.
    ///
    /// Only one loop may run per registry; a second call returns
    /// [`Error::ScannerRunning`]. A device error ends the loop. Once it has
    /// returned or been dropped, `run` may be called again and resumes
    /// scanning the configured boards.
    pub async fn run<T: DelayNs>(&self, mut delay: T) -> Result<Infallible, Error<D::Error>> {
        let Some(_claim) = ScanClaim::take(self) else {
            warn!("Touch scanner is already running");
            return Err(Error::ScannerRunning);
        };

        while !self.scanner_started() {
            self.scanner.wait().await;
        }
        debug!("Touch scanner running");
        loop {
            if let Err(err) = self.scan_once().await {
                error!("Touch scanner stopped: {err:?}");
                return Err(err);
            }
            delay.delay_ms(self.config().poll_interval_ms).await;
        }
    }

    /// Reads every configured board once and dispatches its edges.
    ///
    /// Boards are visited in ascending number. For a changed board, edges are
    /// delivered in ascending sensor order; each edge updates the board's last
    /// event (and unread flag for touches) before its handlers run.
    pub async fn scan_once(&self) -> Result<(), Error<D::Error>> {
        for board in BoardNumber::all() {
            let Some(address) = self.with_board(board, |b| b.address) else {
                continue;
            };

            let status = self
                .device
                .lock()
                .await
                .read_status(address)
                .await
                .map_err(Error::Device)?;
            if status.over_current() {
                warn!("Over-current on touch board {} ({address:#04x})", board.get());
            }

            let current = status.touched();
            let Some(previous) = self
                .with_board(board, |b| b.update_status(current))
                .flatten()
            else {
                continue;
            };
            debug!(
                "Touch board {}: {previous:#014b} -> {current:#014b}",
                board.get()
            );

            for edge in edges(previous, current) {
                let Some(callbacks) = self.with_board(board, |b| b.record(edge)) else {
                    break;
                };
                debug!(
                    "Touch board {}: {:?} on bit {:#06x}, {} handler(s)",
                    board.get(),
                    edge.action(),
                    edge.bit(),
                    callbacks.len()
                );
                fire(&callbacks);
            }
        }
        Ok(())
    }
}

/// The right to run the scan loop, given back on drop.
struct ScanClaim<'a, M: RawMutex, D: TouchDevice> {
    registry: &'a TouchRegistry<M, D>,
}

impl<'a, M: RawMutex, D: TouchDevice> ScanClaim<'a, M, D> {
    fn take(registry: &'a TouchRegistry<M, D>) -> Option<Self> {
        let claimed = registry
            .state
            .lock(|state| !core::mem::replace(&mut state.borrow_mut().scanner_running, true));
        claimed.then_some(Self { registry })
    }
}

impl<M: RawMutex, D: TouchDevice> Drop for ScanClaim<'_, M, D> {
    fn drop(&mut self) {
        self.registry
            .state
            .lock(|state| state.borrow_mut().scanner_running = false);
    }
}
