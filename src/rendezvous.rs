//! Rendezvous Primitive
//!
//! A one-shot "characteristics ready" signal between the event handlers
//! (single producer) and one cooperative consumer task. The client sets it
//! exactly once per successful discovery cycle and resets it whenever the
//! cycle is torn down, so the next cycle can signal again.
//!
//! ```rust,ignore
//! static READY: Rendezvous<CriticalSectionRawMutex> = Rendezvous::new();
//!
//! #[embassy_executor::task]
//! async fn consumer() {
//!     READY.wait().await;
//!     // characteristic table is populated
//! }
//! ```

use core::future::Future;
use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

/// Two-state (unset/set) signal for a single consumer
pub struct Rendezvous<M: RawMutex> {
    signal: Signal<M, ()>,
}

impl<M: RawMutex> Rendezvous<M> {
    /// Create an unset rendezvous
    #[must_use]
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Set the signal, waking the waiting task if any
    pub fn set(&self) {
        self.signal.signal(());
    }

    /// Return to the unset state
    pub fn reset(&self) {
        self.signal.reset();
    }

    /// Whether the signal is set and not yet consumed
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.signal.signaled()
    }

    /// Wait until the signal is set, consuming it
    pub async fn wait(&self) {
        self.signal.wait().await;
    }

    /// Wait for the signal or for `other`, whichever finishes first
    ///
    /// Discovery has no internal timeout; pass a timer here to bound the wait.
    pub async fn wait_or<F: Future>(&self, other: F) -> Either<(), F::Output> {
        select(self.signal.wait(), other).await
    }
}

impl<M: RawMutex> Default for Rendezvous<M> {
    fn default() -> Self {
        Self::new()
    }
}
