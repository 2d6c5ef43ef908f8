//! Monotonic clocks and timing helpers
//!
//! The series evaluator never reads a clock itself. The runner takes a
//! [`MonotonicClock`], reads it once before and once after each evaluation, and
//! reports the difference. Clocks are stateless capabilities from the caller's
//! point of view; only [`ManualClock`] keeps state, so tests can control time.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::time::{Duration, Instant};

/// Point in time on a monotonic clock, in nanoseconds from the clock's origin
///
/// Timestamps from different clocks are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    nanos: u64,
}

impl Timestamp {
    #[inline]
    pub fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    #[inline]
    pub fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Get the duration between this timestamp and an earlier one
    ///
    /// Saturates to zero if `earlier` is actually later.
    #[inline]
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(earlier.nanos))
    }
}

/// Monotonic clock abstraction
pub trait MonotonicClock {
    /// Read the current time
    fn now(&self) -> Timestamp;

    /// Time elapsed since `start`, which must come from this clock
    #[inline]
    fn elapsed_since(&self, start: Timestamp) -> Duration {
        self.now().duration_since(start)
    }
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    #[inline]
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for Box<C> {
    #[inline]
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Clock backed by `std::time::Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    #[inline]
    fn now(&self) -> Timestamp {
        Timestamp::from_nanos(self.origin.elapsed().as_nanos() as u64)
    }
}

/// Deterministic clock for tests
///
/// Every read returns the current time and then advances it by `step`. With a
/// zero step the clock only moves through [`ManualClock::advance`].
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: Cell<u64>,
    step: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that advances by `step` on every read
    pub fn with_step(step: Duration) -> Self {
        Self {
            nanos: Cell::new(0),
            step,
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.nanos.set(self.nanos.get() + by.as_nanos() as u64);
    }
}

impl MonotonicClock for ManualClock {
    fn now(&self) -> Timestamp {
        let current = self.nanos.get();
        self.nanos.set(current + self.step.as_nanos() as u64);
        Timestamp::from_nanos(current)
    }
}

/// Clock selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// `std::time::Instant`
    System,
    /// Direct `clock_gettime(CLOCK_MONOTONIC)`
    Fast,
}

impl Default for ClockKind {
    fn default() -> Self {
        Self::System
    }
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockKind::System => write!(f, "system"),
            ClockKind::Fast => write!(f, "fast"),
        }
    }
}

/// Create the clock for a given kind
///
/// The fast clock is only available on unix; elsewhere the system clock is used.
pub fn create_clock(kind: ClockKind) -> Box<dyn MonotonicClock> {
    match kind {
        ClockKind::System => Box::new(SystemClock::new()),
        #[cfg(unix)]
        ClockKind::Fast => Box::new(crate::util::fast_time::FastClock),
        #[cfg(not(unix))]
        ClockKind::Fast => {
            tracing::warn!("fast clock unavailable on this platform, using system clock");
            Box::new(SystemClock::new())
        }
    }
}

/// Run `f` between two reads of `clock`, returning its output and the elapsed time
#[inline]
pub fn timed<C, T, F>(clock: &C, f: F) -> (T, Duration)
where
    C: MonotonicClock + ?Sized,
    F: FnOnce() -> T,
{
    let start = clock.now();
    let output = f();
    let elapsed = clock.now().duration_since(start);
    (output, elapsed)
}

/// Format a duration in human-readable form
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use piseries::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
/// assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}us", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos as f64 / 1_000_000_000.0)
    }
}

/// Format a rate (terms per second)
///
/// # Examples
///
/// ```
/// use piseries::util::time::format_rate;
///
/// assert_eq!(format_rate(500.0), "500");
/// assert_eq!(format_rate(1500.0), "1.50K");
/// assert_eq!(format_rate(2_500_000.0), "2.50M");
/// ```
pub fn format_rate(rate: f64) -> String {
    if rate < 1_000.0 {
        format!("{:.0}", rate)
    } else if rate < 1_000_000.0 {
        format!("{:.2}K", rate / 1_000.0)
    } else if rate < 1_000_000_000.0 {
        format!("{:.2}M", rate / 1_000_000.0)
    } else {
        format!("{:.2}G", rate / 1_000_000_000.0)
    }
}

/// Terms evaluated per second
///
/// Returns 0.0 for a zero duration or a non-positive term count.
pub fn calculate_rate(terms: i64, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 && terms > 0 {
        terms as f64 / seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_system_clock_elapsed() {
        let clock = SystemClock::new();
        let start = clock.now();
        thread::sleep(Duration::from_millis(10));
        let elapsed = clock.elapsed_since(start);

        assert!(elapsed >= Duration::from_millis(10));
        assert!(elapsed < Duration::from_millis(500)); // Allow some slack
    }

    #[test]
    fn test_timestamp_duration_since_saturates() {
        let early = Timestamp::from_nanos(100);
        let late = Timestamp::from_nanos(350);

        assert_eq!(late.duration_since(early), Duration::from_nanos(250));
        assert_eq!(early.duration_since(late), Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_step() {
        let clock = ManualClock::with_step(Duration::from_millis(3));
        assert_eq!(clock.now().as_nanos(), 0);
        assert_eq!(clock.now().as_nanos(), 3_000_000);

        clock.advance(Duration::from_millis(1));
        assert_eq!(clock.now().as_nanos(), 7_000_000);
    }

    #[test]
    fn test_timed_reads_clock_twice() {
        let clock = ManualClock::with_step(Duration::from_micros(40));
        let (value, elapsed) = timed(&clock, || 6 * 7);

        assert_eq!(value, 42);
        assert_eq!(elapsed, Duration::from_micros(40));
    }

    #[test]
    fn test_clock_through_reference_and_box() {
        let manual = ManualClock::new();
        manual.advance(Duration::from_nanos(9));
        assert_eq!((&manual).now().as_nanos(), 9);

        let boxed: Box<dyn MonotonicClock> = create_clock(ClockKind::System);
        let start = boxed.now();
        assert!(boxed.now() >= start);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(500.0), "500");
        assert_eq!(format_rate(1500.0), "1.50K");
        assert_eq!(format_rate(1_500_000.0), "1.50M");
        assert_eq!(format_rate(1_500_000_000.0), "1.50G");
    }

    #[test]
    fn test_calculate_rate() {
        assert_eq!(calculate_rate(1000, Duration::from_secs(10)), 100.0);
        assert_eq!(calculate_rate(1000, Duration::ZERO), 0.0);
        assert_eq!(calculate_rate(0, Duration::from_secs(1)), 0.0);
    }
}
