//! Board registry, handler registration and the query API.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use log::{debug, info};

use crate::board::{Board, BoardNumber, MAX_BOARDS};
use crate::config::TouchConfig;
use crate::device::TouchDevice;
use crate::error::Error;
use crate::handler::{Callback, TouchAction, TouchHandler};
use crate::sensor::{Selector, NO_SENSOR};

pub(crate) struct State {
    pub(crate) boards: [Option<Board>; MAX_BOARDS],
    pub(crate) scanner_started: bool,
    pub(crate) scanner_running: bool,
}

/// Touch state of up to four MPR121 boards sharing one bus.
///
/// Client code and the scan task share the registry by reference (typically a
/// `&'static` from a `StaticCell`). Boards are configured on first use and live
/// as long as the registry. The first successful configuration releases the
/// scan loop, see [`TouchRegistry::run`].
pub struct TouchRegistry<M: RawMutex, D: TouchDevice> {
    config: TouchConfig,
    pub(crate) device: Mutex<M, D>,
    pub(crate) state: BlockingMutex<M, RefCell<State>>,
    pub(crate) scanner: Signal<M, ()>,
}

impl<M: RawMutex, D: TouchDevice> TouchRegistry<M, D> {
    /// Creates a new `TouchRegistry`.
    ///
    /// # Arguments
    ///
    /// * `device` - The driver for the bus all boards are connected to.
    /// * `config` - Addressing, chip configuration and poll interval.
    pub fn new(device: D, config: TouchConfig) -> Self {
        Self {
            config,
            device: Mutex::new(device),
            state: BlockingMutex::new(RefCell::new(State {
                boards: [const { None }; MAX_BOARDS],
                scanner_started: false,
                scanner_running: false,
            })),
            scanner: Signal::new(),
        }
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Whether a board has been configured and the scan loop released.
    pub fn scanner_started(&self) -> bool {
        self.state.lock(|state| state.borrow().scanner_started)
    }

    /// Configures `board` unless it already exists.
    ///
    /// The bus stays locked from the existence check until the board is
    /// stored, so concurrent callers wait for a configuration in progress and
    /// then see its outcome. A board only enters the registry once it is
    /// configured; if the configuration fails nothing is stored and the next
    /// call retries.
    pub async fn ensure_initialized(&self, board: BoardNumber) -> Result<(), Error<D::Error>> {
        if self.exists(board) {
            return Ok(());
        }
        let address = self
            .config
            .address(board)
            .ok_or(Error::InvalidBoard(board.get()))?;
        let mut device = self.device.lock().await;
        if self.exists(board) {
            return Ok(());
        }

        info!("Initializing touch board {} at address {address:#04x}", board.get());
        self.configure_board(&mut device, address).await?;

        let first = self.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.boards[board.slot()] = Some(Board::new(address));
            !core::mem::replace(&mut state.scanner_started, true)
        });
        drop(device);
        if first {
            info!("Starting touch scanner");
            self.scanner.signal(());
        }
        Ok(())
    }

    fn exists(&self, board: BoardNumber) -> bool {
        self.state
            .lock(|state| state.borrow().boards[board.slot()].is_some())
    }

    async fn configure_board(&self, device: &mut D, address: u8) -> Result<(), Error<D::Error>> {
        let conf = &self.config.device;

        device.reset(address).await.map_err(Error::Device)?;
        device.stop(address).await.map_err(Error::Device)?;
        for (register, value) in conf.registers() {
            device
                .configure(address, register, value)
                .await
                .map_err(Error::Device)?;
        }
        device
            .configure_thresholds(address, conf.thresholds.touch, conf.thresholds.release)
            .await
            .map_err(Error::Device)?;
        device.start(address).await.map_err(Error::Device)
    }

    /// Runs `f` on the state of `board`, if it exists.
    pub(crate) fn with_board<R>(
        &self,
        board: BoardNumber,
        f: impl FnOnce(&mut Board) -> R,
    ) -> Option<R> {
        self.state
            .lock(|state| state.borrow_mut().boards[board.slot()].as_mut().map(f))
    }

    async fn initialized(&self, board: u8) -> Result<BoardNumber, Error<D::Error>> {
        let number = BoardNumber::new(board).ok_or(Error::InvalidBoard(board))?;
        self.ensure_initialized(number).await?;
        Ok(number)
    }

    /// Calls `callback` whenever a sensor matching `selector` on `board` sees
    /// `action`.
    pub async fn on_touch(
        &self,
        board: u8,
        selector: Selector,
        action: TouchAction,
        callback: Callback,
    ) -> Result<(), Error<D::Error>> {
        if selector.mask() == NO_SENSOR {
            return Err(Error::InvalidSensor(selector));
        }
        let number = self.initialized(board).await?;

        debug!("Registering {action:?} handler for board {board} sensor {selector:?}");
        let handler = TouchHandler::new(selector, callback);
        match self.with_board(number, |b| b.handlers_mut(action).push(handler)) {
            Some(Ok(())) => Ok(()),
            Some(Err(_)) => Err(Error::HandlerListFull(number)),
            None => Err(Error::Uninitialized(number)),
        }
    }

    /// Registers a handler for touch edges.
    pub async fn register_touch(
        &self,
        board: u8,
        selector: Selector,
        callback: Callback,
    ) -> Result<(), Error<D::Error>> {
        self.on_touch(board, selector, TouchAction::Touched, callback)
            .await
    }

    /// Registers a handler for release edges.
    pub async fn register_release(
        &self,
        board: u8,
        selector: Selector,
        callback: Callback,
    ) -> Result<(), Error<D::Error>> {
        self.on_touch(board, selector, TouchAction::Released, callback)
            .await
    }

    /// Whether the selected sensor is currently touched. [`Selector::Any`] asks
    /// whether any sensor is; a selector naming no sensor is never touched.
    pub async fn is_touched(&self, board: u8, selector: Selector) -> Result<bool, Error<D::Error>> {
        let number = self.initialized(board).await?;
        Ok(self
            .with_board(number, |b| b.is_touched(selector))
            .unwrap_or(false))
    }

    /// The sensor of the most recent touch or release edge, `None` before the first.
    pub async fn last_touched_index(&self, board: u8) -> Result<Option<u8>, Error<D::Error>> {
        let number = self.initialized(board).await?;
        Ok(self
            .with_board(number, |b| b.last_touched_index())
            .flatten())
    }

    /// Returns whether a sensor was touched since the previous call, and clears
    /// the flag.
    pub async fn consume_unread_touch(&self, board: u8) -> Result<bool, Error<D::Error>> {
        let number = self.initialized(board).await?;
        Ok(self
            .with_board(number, |b| b.take_unread_touch())
            .unwrap_or(false))
    }

    /// The 12-bit mask of currently touched sensors.
    pub async fn touched_mask(&self, board: u8) -> Result<u16, Error<D::Error>> {
        let number = self.initialized(board).await?;
        Ok(self.with_board(number, |b| b.status()).unwrap_or(0))
    }
}
