//! Run statistics
//!
//! Summaries computed over the samples produced by repeated timed evaluations:
//!
//! - **Timing**: min/max/mean/median/std-dev of per-run execution times
//! - **Determinism**: bit-level and ulp comparison of results
//!
//! # Example
//!
//! ```
//! use piseries::stats::{Divergence, TimingSummary};
//! use std::time::Duration;
//!
//! let summary = TimingSummary::from_durations(&[
//!     Duration::from_millis(10),
//!     Duration::from_millis(30),
//! ]);
//! assert_eq!(summary.mean, Duration::from_millis(20));
//!
//! let d = Divergence::between(1.0, 1.0);
//! assert_eq!(d.ulps, 0);
//! ```

pub mod determinism;
pub mod timing;

pub use determinism::{all_bit_identical, ulp_distance, Divergence};
pub use timing::TimingSummary;
