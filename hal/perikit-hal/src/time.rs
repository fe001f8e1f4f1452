//! Monotonic time
//!
//! Edge notifications carry an [`Instant`] taken by the port when the level
//! changed. Drivers that need "now" outside a notification (trigger pulses,
//! timeouts) ask a [`Monotonic`] clock.

use core::ops::Add;
use core::time::Duration;

/// Point on a monotonic microsecond timeline
///
/// The epoch is arbitrary (typically boot); only differences are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant {
    micros: u64,
}

impl Instant {
    /// The start of the timeline
    pub const ZERO: Instant = Instant { micros: 0 };

    /// Create an instant from microseconds since the epoch
    pub const fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    /// Create an instant from milliseconds since the epoch
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            micros: millis.saturating_mul(1_000),
        }
    }

    /// Microseconds since the epoch
    pub const fn as_micros(&self) -> u64 {
        self.micros
    }

    /// Time elapsed from `earlier` to `self`, or `None` if `earlier` is later
    pub fn checked_duration_since(&self, earlier: Instant) -> Option<Duration> {
        self.micros
            .checked_sub(earlier.micros)
            .map(Duration::from_micros)
    }

    /// Time elapsed from `earlier` to `self`, zero if `earlier` is later
    pub fn saturating_duration_since(&self, earlier: Instant) -> Duration {
        self.checked_duration_since(earlier)
            .unwrap_or(Duration::ZERO)
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        let delta = u64::try_from(rhs.as_micros()).unwrap_or(u64::MAX);
        Instant {
            micros: self.micros.saturating_add(delta),
        }
    }
}

/// Monotonic clock source
///
/// Must never go backwards and should resolve at least one microsecond.
pub trait Monotonic {
    /// Current time
    fn now(&self) -> Instant;
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
