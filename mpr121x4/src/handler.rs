//! Touch and release handler lists.

use core::fmt;

use heapless::Vec;

use crate::sensor::Selector;

/// Handlers per board and direction.
pub const MAX_HANDLERS: usize = 16;

/// A zero-argument callback. It runs inside the scan task, so it must not block.
pub type Callback = &'static (dyn Fn() + Sync);

/// The callbacks an edge resolved to, in registration order.
pub type Callbacks = Vec<Callback, MAX_HANDLERS>;

/// The edge a handler listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// The sensor went from released to touched.
    Touched,
    /// The sensor went from touched to released.
    Released,
}

/// A sensor selector paired with its callback.
#[derive(Clone, Copy)]
pub struct TouchHandler {
    selector: Selector,
    callback: Callback,
}

impl TouchHandler {
    /// Creates a new `TouchHandler`.
    pub fn new(selector: Selector, callback: Callback) -> Self {
        Self { selector, callback }
    }

    /// The sensor(s) this handler listens to.
    pub fn selector(&self) -> Selector {
        self.selector
    }
}

impl fmt::Debug for TouchHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchHandler")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// An append-only list of handlers. Insertion order is invocation order.
#[derive(Debug, Default)]
pub struct HandlerList {
    handlers: Vec<TouchHandler, MAX_HANDLERS>,
}

impl HandlerList {
    /// Appends a handler, handing it back when the list is full.
    pub fn push(&mut self, handler: TouchHandler) -> Result<(), TouchHandler> {
        self.handlers.push(handler)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Callbacks whose selector is `bit` or [`Selector::Any`].
    pub fn matching(&self, bit: u16) -> Callbacks {
        self.handlers
            .iter()
            .filter(|h| h.selector.matches(bit))
            .map(|h| h.callback)
            .collect()
    }
}

/// Invokes `callbacks` in order, synchronously.
pub fn fire(callbacks: &[Callback]) {
    for callback in callbacks {
        callback();
    }
}
