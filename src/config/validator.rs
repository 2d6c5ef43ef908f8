//! Configuration validation
//!
//! The evaluator does not check its inputs, so every precondition on the series
//! parameters is enforced here before a run starts.

use super::*;
use anyhow::Result;
use thiserror::Error;
use tracing::warn;

/// Upper bound on timed evaluations per run
pub const MAX_REPEAT: usize = 10_000;

/// Upper bound on warmup evaluations per run
pub const MAX_WARMUP: usize = 1_000;

/// Series parameter precondition violation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("iterations must be at least 1, got {0}")]
    NonPositiveIterations(i64),

    #[error("coefficient {name} must be finite, got {value}")]
    NonFiniteCoefficient { name: &'static str, value: f64 },

    #[error("coeff_a must be nonzero")]
    ZeroCoefficient,

    #[error("term {index} has a zero denominator (coeff_a * {index} == ±coeff_b)")]
    SingularTerm { index: i64 },
}

/// Check the series preconditions
///
/// Fails if the iteration count is below 1, a coefficient is not finite,
/// `coeff_a` is zero, or some `k` in `1..=iterations` makes a denominator zero
/// in either formulation.
pub fn check_parameters(params: &SeriesParameters) -> std::result::Result<(), ParameterError> {
    if params.iterations < 1 {
        return Err(ParameterError::NonPositiveIterations(params.iterations));
    }

    for (name, value) in [("coeff_a", params.coeff_a), ("coeff_b", params.coeff_b)] {
        if !value.is_finite() {
            return Err(ParameterError::NonFiniteCoefficient { name, value });
        }
    }

    if params.coeff_a == 0.0 {
        return Err(ParameterError::ZeroCoefficient);
    }

    if let Some(index) = singular_index(params) {
        return Err(ParameterError::SingularTerm { index });
    }

    Ok(())
}

/// Find the index whose denominator is zero, if any
///
/// `a·k = ±b` can only hold for `k = |b/a|`, so only the integers next to that
/// ratio need checking. Both the exact products and the squared difference used
/// by the combined formula are tested, since rounding can zero the latter alone.
fn singular_index(params: &SeriesParameters) -> Option<i64> {
    let a = params.coeff_a;
    let b = params.coeff_b;
    let ratio = (b / a).abs();
    if !ratio.is_finite() || ratio > params.iterations as f64 + 1.0 {
        return None;
    }

    let center = ratio.round() as i64;
    (center.saturating_sub(1)..=center.saturating_add(1))
        .filter(|k| (1..=params.iterations).contains(k))
        .find(|&k| {
            let ak = a * k as f64;
            ak - b == 0.0 || ak + b == 0.0 || ak * ak - b * b == 0.0
        })
}

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_series(&config.series, &config.runtime)?;
    validate_run(&config.run)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate series parameters unless degenerate input is explicitly allowed
pub fn validate_series(series: &SeriesParameters, runtime: &RuntimeConfig) -> Result<()> {
    match check_parameters(series) {
        Ok(()) => Ok(()),
        Err(e) if runtime.allow_degenerate => {
            warn!("{} (continuing, degenerate parameters allowed)", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Validate run configuration
pub fn validate_run(run: &RunConfig) -> Result<()> {
    if run.repeat == 0 || run.repeat > MAX_REPEAT {
        anyhow::bail!("repeat must be between 1 and {}, got {}", MAX_REPEAT, run.repeat);
    }

    if run.warmup > MAX_WARMUP {
        anyhow::bail!("warmup must be at most {}, got {}", MAX_WARMUP, run.warmup);
    }

    if !(run.tolerance >= 0.0) || !run.tolerance.is_finite() {
        anyhow::bail!("tolerance must be a finite non-negative number, got {}", run.tolerance);
    }

    if run.repeat > 100 {
        warn!("High repeat count ({}), the run may take a long time", run.repeat);
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if let (Some(json), Some(csv)) = (&output.json_output, &output.csv_output) {
        if json == csv {
            anyhow::bail!(
                "json_output and csv_output must be different files, both are {}",
                json.display()
            );
        }
    }

    Ok(())
}
