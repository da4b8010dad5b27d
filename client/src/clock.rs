//! Time source and id assignment.
//!
//! Food ids are creation-time ordinals: milliseconds since the epoch,
//! nudged forward when two creations land in the same millisecond so ids
//! stay strictly increasing. The clock is a seam so tests can drive it.

use pantry_engine::FoodId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the current wall-clock time in milliseconds since the epoch.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// System clock backed by chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Issues strictly increasing time-derived ids.
#[derive(Debug)]
pub struct IdSource<C> {
    clock: C,
    last: AtomicU64,
}

impl<C: Clock> IdSource<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }

    /// Next id: the current time, or one past the previous id when the
    /// clock has not moved (or moved backwards).
    pub fn next(&self) -> FoodId {
        let now = self.clock.now_ms();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for IdSource<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;

    struct ManualClock(AtomicU64);

    impl Clock for &ManualClock {
        fn now_ms(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn ids_follow_the_clock() {
        let clock = ManualClock(AtomicU64::new(1_700_000_000_000));
        let ids = IdSource::new(&clock);

        assert_eq!(ids.next(), 1_700_000_000_000);

        clock.0.store(1_700_000_000_500, Ordering::SeqCst);
        assert_eq!(ids.next(), 1_700_000_000_500);
    }

    #[test]
    fn same_millisecond_still_increases() {
        let clock = ManualClock(AtomicU64::new(1000));
        let ids = IdSource::new(&clock);

        assert_eq!(ids.next(), 1000);
        assert_eq!(ids.next(), 1001);
        assert_eq!(ids.next(), 1002);
    }

    #[test]
    fn backwards_clock_never_repeats() {
        let clock = ManualClock(AtomicU64::new(2000));
        let ids = IdSource::new(&clock);

        assert_eq!(ids.next(), 2000);
        clock.0.store(1500, Ordering::SeqCst);
        assert_eq!(ids.next(), 2001);
    }

    #[test]
    fn system_clock_is_sane() {
        // After 2023, before 2100.
        let now = SystemClock.now_ms();
        assert!(now > 1_672_531_200_000);
        assert!(now < 4_102_444_800_000);
    }
}
