//! Time sources for lifecycle timestamps.
//!
//! Production code reads the system clock. Tests inject a [`ManualClock`] to
//! get exact, ordered timestamps without sleeping.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of "now" for lifecycle operations.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock with microsecond resolution.
///
/// Interior mutability lets one instance be shared by reference while the
/// test drives time forward.
#[derive(Debug)]
pub struct ManualClock {
    micros: AtomicI64,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            micros: AtomicI64::new(start.timestamp_micros()),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, at: DateTime<Utc>) {
        self.micros.store(at.timestamp_micros(), Ordering::SeqCst);
    }

    /// Move the clock forward (or backward, for a negative delta).
    ///
    /// Saturates at the ends of the microsecond range.
    pub fn advance(&self, by: TimeDelta) {
        let delta = by
            .num_microseconds()
            .unwrap_or(if by < TimeDelta::zero() { i64::MIN } else { i64::MAX });
        let current = self.micros.load(Ordering::SeqCst);
        self.micros
            .store(current.saturating_add(delta), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_micros(self.micros.load(Ordering::SeqCst)).unwrap_or_default()
    }
}
