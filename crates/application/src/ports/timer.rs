//! Cancellable timer port

use std::time::Duration;

/// A one-shot timer that can be restarted or cancelled.
///
/// The timer does not run callbacks; its owner polls [`has_fired`] from
/// its own event loop.
///
/// [`has_fired`]: CancellableTimer::has_fired
pub trait CancellableTimer: Send {
    /// Starts the timer, cancelling any pending run.
    fn start(&mut self, delay: Duration);

    /// Cancels a pending run. Does nothing if the timer is idle.
    fn cancel(&mut self);

    /// Returns true once the delay of the last `start` has elapsed,
    /// unless it was cancelled since.
    fn has_fired(&self) -> bool;
}
