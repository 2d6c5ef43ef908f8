//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// piseries - Leibniz-type series evaluator with wall-clock timing
///
/// With no arguments, evaluates 200,000,000 terms with a = 4, b = 1 and prints
/// the scaled result and the execution time.
#[derive(Parser, Debug, Default)]
#[command(name = "piseries")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Series Options ===
    /// Number of terms to accumulate (e.g., 1000, 5M, 200_000_000)
    #[arg(short = 'n', long)]
    pub iterations: Option<String>,

    /// Coefficient multiplying the loop index
    #[arg(long, allow_negative_numbers = true)]
    pub coeff_a: Option<f64>,

    /// Offset coefficient
    #[arg(long, allow_negative_numbers = true)]
    pub coeff_b: Option<f64>,

    /// Series formulation
    #[arg(short = 'f', long, value_enum)]
    pub formula: Option<FormulaType>,

    // === Run Options ===
    /// Number of timed evaluations
    #[arg(short = 'r', long)]
    pub repeat: Option<usize>,

    /// Untimed evaluations before timing starts
    #[arg(long)]
    pub warmup: Option<usize>,

    /// Clock used for timing
    #[arg(long, value_enum)]
    pub clock: Option<ClockType>,

    /// Also evaluate the other formulation and report the divergence
    #[arg(long)]
    pub verify_formulas: bool,

    /// Relative tolerance for --verify-formulas
    #[arg(long, allow_negative_numbers = true)]
    pub tolerance: Option<f64>,

    // === Output Options ===
    /// JSON report file path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Write compact instead of pretty-printed JSON
    #[arg(long)]
    pub compact_json: bool,

    /// CSV report file path
    #[arg(long)]
    pub csv_output: Option<PathBuf>,

    // === Configuration File ===
    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Dry run - validate configuration without evaluating
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,

    /// Skip precondition checks on the series parameters
    /// WARNING: a zero denominator makes the result infinite or NaN.
    #[arg(long)]
    pub allow_degenerate: bool,
}

/// Series formulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormulaType {
    /// One division per term: 2b / ((a·k)² - b²)
    Combined,
    /// Two divisions per term: 1/(a·k - b) - 1/(a·k + b)
    Expanded,
}

/// Timing clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockType {
    /// std::time::Instant
    System,
    /// Direct clock_gettime(CLOCK_MONOTONIC)
    Fast,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    ///
    /// Only checks that need the raw arguments live here; everything else is
    /// checked on the merged configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.repeat == Some(0) {
            anyhow::bail!("repeat must be at least 1");
        }

        if let Some(tolerance) = self.tolerance {
            if !self.verify_formulas && self.config.is_none() {
                tracing::warn!("--tolerance has no effect without --verify-formulas");
            }
            if !(tolerance >= 0.0) {
                anyhow::bail!("tolerance must be a non-negative number, got {}", tolerance);
            }
        }

        if let (Some(json), Some(csv)) = (&self.json_output, &self.csv_output) {
            if json == csv {
                anyhow::bail!("--json-output and --csv-output must be different files");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["piseries"]).unwrap();
        assert!(cli.iterations.is_none());
        assert!(cli.coeff_a.is_none());
        assert!(cli.formula.is_none());
        assert!(!cli.dry_run);
        cli.validate().unwrap();
    }

    #[test]
    fn test_series_arguments() {
        let cli = Cli::try_parse_from([
            "piseries", "-n", "5M", "--coeff-a", "8", "--coeff-b", "-2", "--formula", "expanded",
        ])
        .unwrap();
        assert_eq!(cli.iterations.as_deref(), Some("5M"));
        assert_eq!(cli.coeff_a, Some(8.0));
        assert_eq!(cli.coeff_b, Some(-2.0));
        assert_eq!(cli.formula, Some(FormulaType::Expanded));
    }

    #[test]
    fn test_validate_repeat_zero() {
        let cli = Cli::try_parse_from(["piseries", "--repeat", "0"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_negative_tolerance() {
        let cli = Cli::try_parse_from(["piseries", "--verify-formulas", "--tolerance", "-1"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_same_output_paths() {
        let cli = Cli::try_parse_from([
            "piseries", "--json-output", "out.txt", "--csv-output", "out.txt",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_invalid_formula_rejected() {
        assert!(Cli::try_parse_from(["piseries", "--formula", "fused"]).is_err());
    }
}
