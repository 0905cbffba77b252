//! One-shot signal used to park the calling thread until a transport reports.
//!
//! A `Signal` is fired at most once (firing consumes it) and a `Waiter` waits
//! at most once. The value travels through a single-slot channel, so the
//! waiter observes it fully written without any further synchronization.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::time::Duration;

/// Sending half. Dropping it unfired disconnects the waiter.
#[derive(Debug)]
pub struct Signal<T> {
    tx: SyncSender<T>,
}

/// Receiving half.
#[derive(Debug)]
pub struct Waiter<T> {
    rx: Receiver<T>,
}

/// Why a wait ended without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    /// The deadline passed first.
    TimedOut,
    /// The `Signal` was dropped without firing.
    Abandoned,
}

/// Create an unsignaled pair.
pub fn one_shot<T>() -> (Signal<T>, Waiter<T>) {
    let (tx, rx) = mpsc::sync_channel(1);
    (Signal { tx }, Waiter { rx })
}

impl<T> Signal<T> {
    /// Publish `value` and wake the waiter. A waiter that already gave up
    /// is not an error; the value is dropped.
    pub fn fire(self, value: T) {
        // The slot is fresh and this is the only send, so this never blocks.
        let _ = self.tx.send(value);
    }
}

impl<T> Waiter<T> {
    /// Block until the signal fires, optionally giving up after `timeout`.
    pub fn wait(self, timeout: Option<Duration>) -> Result<T, WaitError> {
        match timeout {
            None => self.rx.recv().map_err(|_| WaitError::Abandoned),
            Some(timeout) => self.rx.recv_timeout(timeout).map_err(|err| match err {
                RecvTimeoutError::Timeout => WaitError::TimedOut,
                RecvTimeoutError::Disconnected => WaitError::Abandoned,
            }),
        }
    }
}
