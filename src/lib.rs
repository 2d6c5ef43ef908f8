//! piseries - Leibniz-type series evaluator
//!
//! piseries evaluates a fixed number of terms of a partial-fraction expansion that
//! converges to π/4, scales the result by 4 and reports it together with the
//! wall-clock time the evaluation took.
//!
//! # Architecture
//!
//! - **Series evaluators**: pure numeric core, two interchangeable formulations
//! - **Clocks**: monotonic clock abstraction consumed by the runner
//! - **Runner**: warmup, timed repeats, determinism and formula cross-checks
//! - **Output**: fixed two-line console report, optional JSON and CSV

pub mod config;
pub mod output;
pub mod runner;
pub mod series;
pub mod stats;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use runner::{RunReport, Runner};
pub use series::{evaluate, Formula, SeriesEvaluator, SeriesParameters, SCALE_FACTOR};

/// Result type used throughout piseries
pub type Result<T> = anyhow::Result<T>;
