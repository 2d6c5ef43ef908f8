//! Series evaluation
//!
//! This module holds the numeric core of piseries: a fixed-length partial-fraction
//! expansion of the Leibniz series,
//!
//! ```text
//! π/4 = 1 - Σ_{k=1..n} ( 1/(a·k - b) - 1/(a·k + b) )      with a = 4, b = 1
//! ```
//!
//! The accumulator starts at [`SEED`] and every iteration subtracts one correction
//! term. The raw accumulator is returned; callers multiply by [`SCALE_FACTOR`] to
//! obtain the approximation of π.
//!
//! # Formulations
//!
//! - **Combined**: one division per term, `2b / ((a·k)² - b²)`
//! - **Expanded**: two divisions per term, `1/(a·k - b)` then `1/(a·k + b)`
//!
//! Both are the same recurrence over the reals. In `f64` they may disagree in the
//! last few digits since the operations are applied in a different order.
//!
//! # Preconditions
//!
//! Evaluators never check their inputs. A zero denominator yields `±inf` or `NaN`,
//! which then flows silently into the returned value. Use
//! [`crate::config::validator::check_parameters`] before evaluating untrusted input.
//!
//! # Example
//!
//! ```
//! use piseries::series::{Formula, SeriesEvaluator, SCALE_FACTOR};
//!
//! let acc = Formula::Combined.evaluate(1, 4.0, 1.0);
//! assert!((acc - 13.0 / 15.0).abs() < 1e-15);
//!
//! let pi = Formula::Expanded.evaluate(1_000_000, 4.0, 1.0) * SCALE_FACTOR;
//! assert!((pi - std::f64::consts::PI).abs() < 1e-5);
//! ```

pub mod combined;
pub mod expanded;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use combined::CombinedFormula;
pub use expanded::ExpandedFormula;

/// Initial accumulator value
pub const SEED: f64 = 1.0;

/// Multiplier applied to the raw accumulator to approximate π
pub const SCALE_FACTOR: f64 = 4.0;

/// Default iteration count used by the driver
pub const DEFAULT_ITERATIONS: i64 = 200_000_000;

/// Default `a` coefficient
pub const DEFAULT_COEFF_A: f64 = 4.0;

/// Default `b` coefficient
pub const DEFAULT_COEFF_B: f64 = 1.0;

/// Series evaluator trait
///
/// Implementations walk the index range `1..=iterations` and fold each term into an
/// accumulator seeded with [`SEED`]. An empty range (`iterations <= 0`) returns the
/// seed unchanged.
///
/// Implementations must be pure: identical inputs produce bit-identical outputs.
pub trait SeriesEvaluator {
    /// Evaluate the series and return the raw (unscaled) accumulator
    fn evaluate(&self, iterations: i64, coeff_a: f64, coeff_b: f64) -> f64;

    /// Evaluate using a parameter triple
    fn evaluate_params(&self, params: &SeriesParameters) -> f64 {
        self.evaluate(params.iterations, params.coeff_a, params.coeff_b)
    }

    /// Evaluate and apply [`SCALE_FACTOR`]
    fn approximate(&self, params: &SeriesParameters) -> f64 {
        self.evaluate_params(params) * SCALE_FACTOR
    }

    /// Short lowercase name, used in reports
    fn name(&self) -> &'static str;
}

/// Evaluate with the combined single-division formula
///
/// This is the driver's default formulation.
#[inline]
pub fn evaluate(iterations: i64, coeff_a: f64, coeff_b: f64) -> f64 {
    combined::evaluate(iterations, coeff_a, coeff_b)
}

/// Immutable parameter triple for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesParameters {
    /// Number of terms to accumulate
    pub iterations: i64,
    /// Coefficient multiplying the loop index
    pub coeff_a: f64,
    /// Offset coefficient
    pub coeff_b: f64,
}

impl SeriesParameters {
    pub fn new(iterations: i64, coeff_a: f64, coeff_b: f64) -> Self {
        Self {
            iterations,
            coeff_a,
            coeff_b,
        }
    }

    /// Same coefficients with a different iteration count
    pub fn with_iterations(self, iterations: i64) -> Self {
        Self { iterations, ..self }
    }
}

impl Default for SeriesParameters {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS, DEFAULT_COEFF_A, DEFAULT_COEFF_B)
    }
}

impl fmt::Display for SeriesParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iterations={} a={} b={}",
            self.iterations, self.coeff_a, self.coeff_b
        )
    }
}

/// Formula selection
///
/// Tagged variant over the available formulations. `Formula` itself implements
/// [`SeriesEvaluator`] by dispatching to the matching implementation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Formula {
    /// Single combined division per term
    Combined,
    /// Two separate divisions per term
    Expanded,
}

impl Formula {
    /// All formulations, in a stable order
    pub const ALL: [Formula; 2] = [Formula::Combined, Formula::Expanded];

    /// The other formulation, used for cross-checking
    pub fn counterpart(self) -> Self {
        match self {
            Formula::Combined => Formula::Expanded,
            Formula::Expanded => Formula::Combined,
        }
    }

    /// Boxed evaluator for this formulation
    pub fn evaluator(self) -> Box<dyn SeriesEvaluator> {
        match self {
            Formula::Combined => Box::new(CombinedFormula),
            Formula::Expanded => Box::new(ExpandedFormula),
        }
    }
}

impl Default for Formula {
    fn default() -> Self {
        Self::Combined
    }
}

impl SeriesEvaluator for Formula {
    #[inline]
    fn evaluate(&self, iterations: i64, coeff_a: f64, coeff_b: f64) -> f64 {
        match self {
            Formula::Combined => combined::evaluate(iterations, coeff_a, coeff_b),
            Formula::Expanded => expanded::evaluate(iterations, coeff_a, coeff_b),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Formula::Combined => CombinedFormula.name(),
            Formula::Expanded => ExpandedFormula.name(),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
