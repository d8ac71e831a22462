//! Debouncing over a cancellable timer
//!
//! A [`Debouncer`] holds the latest pushed value and releases it once the
//! timer has run its full delay without another push.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::ports::{CancellableTimer, Clock};

/// Delays a value until input goes quiet for a fixed period.
pub struct Debouncer<V, T> {
    timer: T,
    delay: Duration,
    pending: Option<V>,
}

impl<V, T: CancellableTimer> Debouncer<V, T> {
    /// Creates an idle debouncer.
    #[must_use]
    pub const fn new(timer: T, delay: Duration) -> Self {
        Self {
            timer,
            delay,
            pending: None,
        }
    }

    /// Returns the quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Stores `value` and restarts the quiet period.
    pub fn push(&mut self, value: V) {
        self.pending = Some(value);
        self.timer.start(self.delay);
    }

    /// Returns the pending value once the quiet period has elapsed.
    pub fn poll(&mut self) -> Option<V> {
        if self.pending.is_some() && self.timer.has_fired() {
            self.pending.take()
        } else {
            None
        }
    }

    /// Returns the pending value now, without waiting.
    pub fn flush(&mut self) -> Option<V> {
        self.timer.cancel();
        self.pending.take()
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.pending = None;
    }

    /// Returns true if a value is waiting for the quiet period.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// A timer that compares a deadline against a [`Clock`].
///
/// It needs no runtime: time only moves when the clock does, which makes it
/// the natural choice in tests and in hosts that poll on their own ticks.
pub struct ClockTimer<C> {
    clock: C,
    deadline: Option<DateTime<Utc>>,
}

impl<C: Clock> ClockTimer<C> {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self {
            clock,
            deadline: None,
        }
    }
}

impl<C: Clock> CancellableTimer for ClockTimer<C> {
    fn start(&mut self, delay: Duration) {
        let now = self.clock.now();
        let deadline = TimeDelta::from_std(delay)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.deadline = Some(deadline);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn has_fired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| self.clock.now() >= deadline)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn new() -> Self {
            Self(Mutex::new(DateTime::<Utc>::UNIX_EPOCH))
        }

        fn advance(&self, ms: i64) {
            *self.0.lock().unwrap() += TimeDelta::milliseconds(ms);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_clock_timer_fires_at_deadline() {
        let clock = ManualClock::new();
        let mut timer = ClockTimer::new(&clock);
        assert!(!timer.has_fired());

        timer.start(DELAY);
        clock.advance(299);
        assert!(!timer.has_fired());
        clock.advance(1);
        assert!(timer.has_fired());
    }

    #[test]
    fn test_clock_timer_cancel() {
        let clock = ManualClock::new();
        let mut timer = ClockTimer::new(&clock);
        timer.start(DELAY);
        timer.cancel();
        clock.advance(1000);
        assert!(!timer.has_fired());
    }

    #[test]
    fn test_debouncer_releases_after_quiet_period() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(ClockTimer::new(&clock), DELAY);

        debouncer.push("a");
        clock.advance(100);
        assert_eq!(debouncer.poll(), None);
        clock.advance(200);
        assert_eq!(debouncer.poll(), Some("a"));
        assert_eq!(debouncer.poll(), None);
    }

    #[test]
    fn test_debouncer_restarts_on_push() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(ClockTimer::new(&clock), DELAY);

        debouncer.push("a");
        clock.advance(200);
        debouncer.push("ab");
        clock.advance(200);
        assert_eq!(debouncer.poll(), None);
        clock.advance(100);
        assert_eq!(debouncer.poll(), Some("ab"));
    }

    #[test]
    fn test_debouncer_flush_and_cancel() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(ClockTimer::new(&clock), DELAY);

        debouncer.push(1);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.flush(), Some(1));
        assert!(!debouncer.is_pending());

        debouncer.push(2);
        debouncer.cancel();
        clock.advance(500);
        assert_eq!(debouncer.poll(), None);
    }
}
