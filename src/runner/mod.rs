//! Timed evaluation runner
//!
//! The Runner is the driver around the pure series evaluator. It owns nothing but
//! the parameters and a clock, and it keeps timing strictly outside the
//! arithmetic: each timed run reads the clock, evaluates and scales, then reads the
//! clock again.
//!
//! # Run sequence
//!
//! 1. `warmup` untimed evaluations (results discarded)
//! 2. `repeat` timed evaluations, each producing a [`RunSample`]
//! 3. Determinism check across the timed results
//! 4. Optional cross-check against the other formulation (untimed)
//!
//! # Example
//!
//! ```
//! use piseries::config::Config;
//! use piseries::runner::Runner;
//! use piseries::series::SeriesParameters;
//! use piseries::util::time::SystemClock;
//!
//! let mut config = Config::default();
//! config.series = SeriesParameters::new(1_000, 4.0, 1.0);
//!
//! let report = Runner::new(&config, SystemClock::new()).run()?;
//! assert!((report.result() - std::f64::consts::PI).abs() < 1e-3);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::{Config, RunConfig};
use crate::series::{Formula, SeriesEvaluator, SeriesParameters};
use crate::stats::{all_bit_identical, Divergence, TimingSummary};
use crate::util::time::{calculate_rate, timed, MonotonicClock};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One timed evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSample {
    /// Scaled result (accumulator × 4)
    pub value: f64,
    /// Wall-clock time for evaluate + scale
    pub elapsed: Duration,
}

/// Cross-check of the configured formulation against its counterpart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormulaCheck {
    /// Formulation compared against
    pub reference: Formula,
    /// Scaled result of the reference formulation
    pub reference_value: f64,
    pub divergence: Divergence,
    pub tolerance: f64,
    pub within_tolerance: bool,
}

/// Outcome of a complete run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub params: SeriesParameters,
    pub formula: Formula,
    /// Wall-clock time the run started
    pub started_at: DateTime<Utc>,
    /// Number of untimed warmup evaluations
    pub warmup: usize,
    /// Timed evaluations in execution order
    pub samples: Vec<RunSample>,
    pub summary: TimingSummary,
    /// All timed results are bit-identical
    pub deterministic: bool,
    pub formula_check: Option<FormulaCheck>,
}

impl RunReport {
    /// Scaled result of the last timed run
    ///
    /// NaN if the report holds no samples.
    pub fn result(&self) -> f64 {
        self.samples.last().map(|s| s.value).unwrap_or(f64::NAN)
    }

    /// Execution time of the last timed run
    pub fn elapsed(&self) -> Duration {
        self.samples.last().map(|s| s.elapsed).unwrap_or_default()
    }

    /// Terms per second, based on the mean run time
    pub fn terms_per_second(&self) -> f64 {
        calculate_rate(self.params.iterations, self.summary.mean)
    }
}

/// Timed evaluation runner
pub struct Runner<C> {
    series: SeriesParameters,
    run: RunConfig,
    clock: C,
}

impl<C: MonotonicClock> Runner<C> {
    /// Create a runner for the series and run settings of `config`
    pub fn new(config: &Config, clock: C) -> Self {
        Self::from_parts(config.series, config.run.clone(), clock)
    }

    pub fn from_parts(series: SeriesParameters, run: RunConfig, clock: C) -> Self {
        Self { series, run, clock }
    }

    /// Evaluate and scale once, timed
    pub fn run_once(&self) -> RunSample {
        let formula = self.run.formula;
        let params = black_box(self.series);
        let (value, elapsed) = timed(&self.clock, || formula.approximate(&params));
        RunSample { value, elapsed }
    }

    /// Execute warmup and timed runs
    pub fn run(&self) -> Result<RunReport> {
        if self.run.repeat == 0 {
            anyhow::bail!("repeat must be at least 1");
        }

        let started_at = Utc::now();
        let formula = self.run.formula;
        debug!(
            formula = %formula,
            params = %self.series,
            warmup = self.run.warmup,
            repeat = self.run.repeat,
            "starting run"
        );

        for _ in 0..self.run.warmup {
            black_box(formula.approximate(&black_box(self.series)));
        }

        let mut samples = Vec::with_capacity(self.run.repeat);
        for index in 0..self.run.repeat {
            let sample = self.run_once();
            debug!(run = index, elapsed_s = sample.elapsed.as_secs_f64(), value = sample.value, "run complete");
            samples.push(sample);
        }

        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        let deterministic = all_bit_identical(&values);
        if !deterministic {
            warn!("repeated evaluations with identical parameters produced different results");
        }

        let durations: Vec<Duration> = samples.iter().map(|s| s.elapsed).collect();
        let summary = TimingSummary::from_durations(&durations);

        let formula_check = if self.run.verify_formulas {
            Some(self.cross_check(values[values.len() - 1]))
        } else {
            None
        };

        let report = RunReport {
            params: self.series,
            formula,
            started_at,
            warmup: self.run.warmup,
            samples,
            summary,
            deterministic,
            formula_check,
        };

        info!(
            result = report.result(),
            mean_s = report.summary.mean.as_secs_f64(),
            runs = report.summary.runs,
            "evaluation finished"
        );

        Ok(report)
    }

    /// Compare `value` against the counterpart formulation, untimed
    fn cross_check(&self, value: f64) -> FormulaCheck {
        let reference = self.run.formula.counterpart();
        let reference_value = reference.approximate(&self.series);
        let divergence = Divergence::between(value, reference_value);
        let within_tolerance = divergence.within(self.run.tolerance);

        if within_tolerance {
            debug!(
                reference = %reference,
                relative = divergence.relative,
                ulps = divergence.ulps,
                "formulations agree"
            );
        } else {
            warn!(
                "{} and {} formulations diverge: relative {:e} exceeds tolerance {:e}",
                self.run.formula, reference, divergence.relative, self.run.tolerance
            );
        }

        FormulaCheck {
            reference,
            reference_value,
            divergence,
            tolerance: self.run.tolerance,
            within_tolerance,
        }
    }
}
