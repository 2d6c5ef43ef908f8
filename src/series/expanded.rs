//! Expanded two-division formulation
//!
//! Applies both partial fractions of each term to the accumulator separately:
//! subtract `1/(a·k - b)`, then add `1/(a·k + b)`. This is the textbook
//! alternating form of the Leibniz series, `1 - 1/3 + 1/5 - 1/7 + ...` for
//! `a = 4, b = 1`.

use crate::series::{SeriesEvaluator, SEED};

/// Two-division evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandedFormula;

impl SeriesEvaluator for ExpandedFormula {
    #[inline]
    fn evaluate(&self, iterations: i64, coeff_a: f64, coeff_b: f64) -> f64 {
        evaluate(iterations, coeff_a, coeff_b)
    }

    fn name(&self) -> &'static str {
        "expanded"
    }
}

/// Evaluate `acc -= 1/(a·k - b); acc += 1/(a·k + b)` for `k` in `1..=iterations`
#[inline]
pub fn evaluate(iterations: i64, coeff_a: f64, coeff_b: f64) -> f64 {
    let mut acc = SEED;
    for k in 1..=iterations {
        let ak = coeff_a * k as f64;
        acc -= 1.0 / (ak - coeff_b);
        acc += 1.0 / (ak + coeff_b);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_alternating_leibniz_prefix() {
        // 1 - 1/3 + 1/5 - 1/7 + 1/9
        let expected = 1.0 - 1.0 / 3.0 + 1.0 / 5.0 - 1.0 / 7.0 + 1.0 / 9.0;
        assert_abs_diff_eq!(evaluate(2, 4.0, 1.0), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_offset_leaves_seed() {
        // 1/(a·k) - 1/(a·k) cancels up to rounding of the accumulator
        assert_abs_diff_eq!(evaluate(1_000, 4.0, 0.0), SEED, epsilon = 1e-12);
    }

    #[test]
    fn test_name() {
        assert_eq!(ExpandedFormula.name(), "expanded");
    }
}
