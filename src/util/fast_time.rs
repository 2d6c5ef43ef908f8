//! Fast monotonic clock using direct clock_gettime calls
//!
//! Bypasses `std::time::Instant` and reads `CLOCK_MONOTONIC` through libc.
//! Useful when the timed region is short enough that clock overhead shows up.

use crate::util::time::{MonotonicClock, Timestamp};
use std::time::Duration;

/// Fast timestamp using direct clock_gettime with CLOCK_MONOTONIC
///
/// Resolution: nanosecond
#[derive(Debug, Copy, Clone)]
pub struct FastInstant {
    nanos: u64,
}

impl FastInstant {
    /// Get the current time using CLOCK_MONOTONIC
    #[inline(always)]
    pub fn now() -> Self {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };

        // CLOCK_MONOTONIC is always supported and `ts` is a valid out-pointer
        unsafe {
            libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
        }

        let nanos = (ts.tv_sec as u64) * 1_000_000_000 + (ts.tv_nsec as u64);

        Self { nanos }
    }

    /// Calculate duration since another FastInstant
    #[inline(always)]
    pub fn duration_since(&self, earlier: FastInstant) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(earlier.nanos))
    }

    /// Get elapsed time since this instant
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        Self::now().duration_since(*self)
    }
}

/// [`MonotonicClock`] backed by [`FastInstant`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FastClock;

impl MonotonicClock for FastClock {
    #[inline(always)]
    fn now(&self) -> Timestamp {
        Timestamp::from_nanos(FastInstant::now().nanos)
    }
}
