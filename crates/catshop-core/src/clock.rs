//! # Clock
//!
//! The pricing engine's only view of "now".
//!
//! Coupon expiry is the single time-dependent rule. Pricing functions take a
//! [`Clock`] (or an explicit instant) instead of reading the wall clock, so
//! tests pin time with [`FixedClock`] and production passes [`SystemClock`].

use chrono::{DateTime, Utc};

/// A source of the current instant.
///
/// Implementations must be cheap to call and safe to share across threads.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
///
/// ## Example
/// ```rust
/// use catshop_core::clock::{Clock, FixedClock};
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// let clock = FixedClock::new(instant);
/// assert_eq!(clock.now(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub const fn new(instant: DateTime<Utc>) -> Self {
        FixedClock(instant)
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fixed_clock_never_moves() {
        let instant = Utc::now() - Duration::days(30);
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_tracks_wall_time() {
        let before = Utc::now();
        let now = SystemClock.now();
        let after = Utc::now();
        assert!(before <= now && now <= after);
    }

    #[test]
    fn test_clock_usable_as_trait_object() {
        let instant = Utc::now();
        let fixed: Box<dyn Clock> = Box::new(FixedClock::new(instant));
        let system: Box<dyn Clock> = Box::new(SystemClock);

        assert_eq!(fixed.now(), instant);
        assert!(system.now() >= instant);
    }

    #[test]
    fn test_references_are_clocks() {
        fn read<C: Clock>(clock: C) -> DateTime<Utc> {
            clock.now()
        }

        let instant = Utc::now();
        let clock = FixedClock::new(instant);
        assert_eq!(read(&clock), instant);
    }
}
