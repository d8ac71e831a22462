//! System clock adapter

use applymail_application::ports::Clock;
use chrono::{DateTime, Utc};

/// System clock implementation using the system time.
///
/// `today()` follows the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock::new();
        let first = clock.now();
        assert!(first.timestamp() > 0);
        assert!(clock.now() >= first);
    }

    #[test]
    fn test_today_is_near_now() {
        let clock = SystemClock::new();
        let utc_date = clock.now().date_naive();
        let days = (clock.today() - utc_date).num_days().abs();
        assert!(days <= 1);
    }
}
