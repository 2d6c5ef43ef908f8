//! Bit-level comparison of repeated results

use serde::{Deserialize, Serialize};

/// Divergence between two evaluations of the same parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    /// `|a - b|`
    pub absolute: f64,
    /// `|a - b| / max(|a|, |b|)`, zero when both are zero
    pub relative: f64,
    /// Distance in units in the last place
    pub ulps: u64,
}

impl Divergence {
    pub fn between(a: f64, b: f64) -> Self {
        let absolute = (a - b).abs();
        let scale = a.abs().max(b.abs());
        let relative = if scale > 0.0 { absolute / scale } else { absolute };

        Self {
            absolute,
            relative,
            ulps: ulp_distance(a, b),
        }
    }

    /// True when the values agree to within `tolerance` relative error
    ///
    /// Non-finite divergence never agrees.
    pub fn within(&self, tolerance: f64) -> bool {
        self.relative.is_finite() && self.relative <= tolerance
    }
}

/// Number of representable doubles between `a` and `b`
///
/// Returns `u64::MAX` if either value is NaN.
pub fn ulp_distance(a: f64, b: f64) -> u64 {
    if a.is_nan() || b.is_nan() {
        return u64::MAX;
    }
    let ordered = |x: f64| -> i64 {
        let bits = x.to_bits() as i64;
        if bits < 0 {
            i64::MIN - bits
        } else {
            bits
        }
    };
    ordered(a).abs_diff(ordered(b))
}

/// True if every value is bit-identical to the first
pub fn all_bit_identical(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v.to_bits() == first.to_bits()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulp_distance() {
        let x = 1.0_f64;
        let next = f64::from_bits(x.to_bits() + 1);
        assert_eq!(ulp_distance(x, x), 0);
        assert_eq!(ulp_distance(x, next), 1);
        assert_eq!(ulp_distance(next, x), 1);
        assert_eq!(ulp_distance(0.0, -0.0), 0);
        assert_eq!(ulp_distance(f64::NAN, 1.0), u64::MAX);
    }

    #[test]
    fn test_divergence() {
        let d = Divergence::between(2.0, 1.0);
        assert_eq!(d.absolute, 1.0);
        assert_eq!(d.relative, 0.5);
        assert!(d.within(0.5));
        assert!(!d.within(0.1));

        let zero = Divergence::between(0.0, 0.0);
        assert_eq!(zero.relative, 0.0);
        assert!(zero.within(1e-9));

        let inf = Divergence::between(f64::INFINITY, 1.0);
        assert!(!inf.within(1e-9));
    }

    #[test]
    fn test_all_bit_identical() {
        assert!(all_bit_identical(&[]));
        assert!(all_bit_identical(&[0.5, 0.5, 0.5]));
        assert!(!all_bit_identical(&[0.5, 0.5, 0.5000000001]));
        assert!(!all_bit_identical(&[0.0, -0.0]));
    }
}
