//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::series::{Formula, SeriesParameters};
use crate::util::time::ClockKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub series: SeriesParameters,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// How the evaluation is executed and timed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Formulation to evaluate
    #[serde(default)]
    pub formula: Formula,
    /// Number of timed evaluations
    #[serde(default = "default_repeat")]
    pub repeat: usize,
    /// Untimed evaluations before the first timed one
    #[serde(default)]
    pub warmup: usize,
    /// Clock used for timing
    #[serde(default)]
    pub clock: ClockKind,
    /// Also evaluate the other formulation and report the divergence
    #[serde(default)]
    pub verify_formulas: bool,
    /// Relative tolerance for the formula cross-check
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_repeat() -> usize {
    1
}

fn default_tolerance() -> f64 {
    1e-9
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            formula: Formula::default(),
            repeat: default_repeat(),
            warmup: 0,
            clock: ClockKind::default(),
            verify_formulas: false,
            tolerance: default_tolerance(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON report path
    pub json_output: Option<PathBuf>,
    /// Pretty-print JSON
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
    /// CSV report path (one row per timed run)
    pub csv_output: Option<PathBuf>,
}

fn default_pretty_json() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_output: None,
            pretty_json: default_pretty_json(),
            csv_output: None,
        }
    }
}

/// Runtime flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Validate and print the configuration without evaluating
    #[serde(default)]
    pub dry_run: bool,
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
    /// Skip parameter precondition checks
    #[serde(default)]
    pub allow_degenerate: bool,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Series:")?;
        writeln!(f, "    Iterations: {}", self.series.iterations)?;
        writeln!(f, "    Coefficient a: {}", self.series.coeff_a)?;
        writeln!(f, "    Coefficient b: {}", self.series.coeff_b)?;
        writeln!(f, "  Run:")?;
        writeln!(f, "    Formula: {}", self.run.formula)?;
        writeln!(f, "    Repeat: {}", self.run.repeat)?;
        writeln!(f, "    Warmup: {}", self.run.warmup)?;
        writeln!(f, "    Clock: {}", self.run.clock)?;
        if self.run.verify_formulas {
            writeln!(f, "    Cross-check tolerance: {:e}", self.run.tolerance)?;
        }
        if let Some(ref path) = self.output.json_output {
            writeln!(f, "  JSON output: {}", path.display())?;
        }
        if let Some(ref path) = self.output.csv_output {
            writeln!(f, "  CSV output: {}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_driver_constants() {
        let config = Config::default();
        assert_eq!(config.series, SeriesParameters::new(200_000_000, 4.0, 1.0));
        assert_eq!(config.run.formula, Formula::Combined);
        assert_eq!(config.run.repeat, 1);
        assert_eq!(config.run.warmup, 0);
        assert_eq!(config.run.tolerance, 1e-9);
        assert!(config.output.pretty_json);
        assert!(!config.runtime.dry_run);
    }

    #[test]
    fn test_display_lists_parameters() {
        let text = Config::default().to_string();
        assert!(text.contains("Iterations: 200000000"));
        assert!(text.contains("Formula: combined"));
        assert!(text.contains("Clock: system"));
        assert!(!text.contains("JSON output"));
    }
}
