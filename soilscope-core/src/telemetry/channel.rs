//! Bounded telemetry channel
//!
//! A thin wrapper over `embassy_sync::channel::Channel` that only exposes
//! the non-blocking operations. The sampling loop never waits for space
//! (drop-on-full) and the rendering loop never waits for data
//! (skip-on-empty).

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use super::reading::Reading;

/// Bounded FIFO of readings between the sampling and rendering loops
///
/// Generic over the raw mutex so the same type works with
/// `CriticalSectionRawMutex` on target and `NoopRawMutex` in
/// single-threaded tests.
pub struct TelemetryChannel<M: RawMutex, const N: usize> {
    inner: Channel<M, Reading, N>,
}

impl<M: RawMutex, const N: usize> Default for TelemetryChannel<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> TelemetryChannel<M, N> {
    /// Create an empty channel
    pub const fn new() -> Self {
        Self {
            inner: Channel::new(),
        }
    }

    /// Enqueue a reading if there is space
    ///
    /// Returns `false` and leaves the channel untouched when full.
    pub fn try_publish(&self, reading: Reading) -> bool {
        self.inner.try_send(reading).is_ok()
    }

    /// Dequeue the oldest pending reading, if any
    pub fn try_consume(&self) -> Option<Reading> {
        self.inner.try_receive().ok()
    }

    /// Writer endpoint for the sampling loop
    pub fn publisher(&self) -> Publisher<'_, M, N> {
        Publisher {
            sender: self.inner.sender(),
        }
    }

    /// Reader endpoint for the rendering loop
    pub fn consumer(&self) -> Consumer<'_, M, N> {
        Consumer {
            receiver: self.inner.receiver(),
        }
    }

    /// Number of readings waiting to be consumed
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if no reading is pending
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Check if a publish would be dropped
    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// Fixed capacity chosen at construction
    pub const fn capacity(&self) -> usize {
        N
    }
}

/// Sampling-side handle to a [`TelemetryChannel`]
pub struct Publisher<'ch, M: RawMutex, const N: usize> {
    sender: Sender<'ch, M, Reading, N>,
}

impl<'ch, M: RawMutex, const N: usize> Publisher<'ch, M, N> {
    /// Enqueue a reading if there is space, never blocking
    pub fn try_publish(&self, reading: Reading) -> bool {
        self.sender.try_send(reading).is_ok()
    }
}

/// Rendering-side handle to a [`TelemetryChannel`]
pub struct Consumer<'ch, M: RawMutex, const N: usize> {
    receiver: Receiver<'ch, M, Reading, N>,
}

impl<'ch, M: RawMutex, const N: usize> Consumer<'ch, M, N> {
    /// Dequeue the oldest pending reading, never blocking
    pub fn try_consume(&self) -> Option<Reading> {
        self.receiver.try_receive().ok()
    }
}
