//! Combined single-division formulation
//!
//! Each term `1/(a·k - b) - 1/(a·k + b)` is folded into one fraction,
//! `2b / ((a·k)² - b²)`. The numerator and `b²` are loop-invariant and hoisted, so
//! the loop body is one multiply-subtract and one division with no dependency
//! between terms other than the accumulator.

use crate::series::{SeriesEvaluator, SEED};

/// Single-division evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedFormula;

impl SeriesEvaluator for CombinedFormula {
    #[inline]
    fn evaluate(&self, iterations: i64, coeff_a: f64, coeff_b: f64) -> f64 {
        evaluate(iterations, coeff_a, coeff_b)
    }

    fn name(&self) -> &'static str {
        "combined"
    }
}

/// Evaluate `acc_k = acc_{k-1} - 2b / ((a·k)² - b²)` for `k` in `1..=iterations`
#[inline]
pub fn evaluate(iterations: i64, coeff_a: f64, coeff_b: f64) -> f64 {
    let numerator = 2.0 * coeff_b;
    let b_squared = coeff_b * coeff_b;

    let mut acc = SEED;
    for k in 1..=iterations {
        let ak = coeff_a * k as f64;
        acc -= numerator / (ak * ak - b_squared);
    }
    acc
}
