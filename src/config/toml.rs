//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{convert_clock, convert_formula, parse_count};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with a base configuration (CLI takes precedence)
///
/// Only arguments the user actually gave override the base. Boolean flags can
/// switch a setting on but never off.
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Series parameters
    if let Some(ref iterations) = cli.iterations {
        config.series.iterations = parse_count(iterations).context("Invalid --iterations")?;
    }
    if let Some(a) = cli.coeff_a {
        config.series.coeff_a = a;
    }
    if let Some(b) = cli.coeff_b {
        config.series.coeff_b = b;
    }

    // Run settings
    if let Some(formula) = cli.formula {
        config.run.formula = convert_formula(formula);
    }
    if let Some(repeat) = cli.repeat {
        config.run.repeat = repeat;
    }
    if let Some(warmup) = cli.warmup {
        config.run.warmup = warmup;
    }
    if let Some(clock) = cli.clock {
        config.run.clock = convert_clock(clock);
    }
    if cli.verify_formulas {
        config.run.verify_formulas = true;
    }
    if let Some(tolerance) = cli.tolerance {
        config.run.tolerance = tolerance;
    }

    // Output settings
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.compact_json {
        config.output.pretty_json = false;
    }
    if let Some(ref path) = cli.csv_output {
        config.output.csv_output = Some(path.clone());
    }

    // Runtime settings
    if cli.dry_run {
        config.runtime.dry_run = true;
    }
    if cli.debug {
        config.runtime.debug = true;
    }
    if cli.allow_degenerate {
        config.runtime.allow_degenerate = true;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::FormulaType;
    use std::io::Write;

    #[test]
    fn test_parse_toml_empty_uses_defaults() {
        let config = parse_toml_string("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_toml_basic() {
        let toml = r#"
[series]
iterations = 1000
coeff_a = 8.0
coeff_b = 2.0

[run]
formula = "expanded"
repeat = 5
warmup = 2
clock = "fast"
verify_formulas = true

[output]
json_output = "/tmp/report.json"
pretty_json = false
"#;

        let config = parse_toml_string(toml).unwrap();
        assert_eq!(config.series.iterations, 1000);
        assert_eq!(config.series.coeff_a, 8.0);
        assert_eq!(config.series.coeff_b, 2.0);
        assert_eq!(config.run.formula, Formula::Expanded);
        assert_eq!(config.run.repeat, 5);
        assert_eq!(config.run.warmup, 2);
        assert_eq!(config.run.clock, ClockKind::Fast);
        assert!(config.run.verify_formulas);
        assert_eq!(config.run.tolerance, 1e-9);
        assert_eq!(config.output.json_output, Some(PathBuf::from("/tmp/report.json")));
        assert!(!config.output.pretty_json);
        assert!(config.output.csv_output.is_none());
    }

    #[test]
    fn test_parse_toml_partial_series() {
        let toml = r#"
[series]
iterations = 42
"#;

        let config = parse_toml_string(toml).unwrap();
        assert_eq!(config.series.iterations, 42);
        assert_eq!(config.series.coeff_a, 4.0);
        assert_eq!(config.series.coeff_b, 1.0);
    }

    #[test]
    fn test_parse_toml_unknown_formula() {
        let toml = r#"
[run]
formula = "fused"
"#;
        assert!(parse_toml_string(toml).is_err());
    }

    #[test]
    fn test_parse_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[series]\niterations = 7").unwrap();

        let config = parse_toml_file(file.path()).unwrap();
        assert_eq!(config.series.iterations, 7);
    }

    #[test]
    fn test_parse_toml_missing_file() {
        let err = parse_toml_file(Path::new("/nonexistent/piseries.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let base = parse_toml_string("[series]\niterations = 10\ncoeff_b = 3.0").unwrap();
        let cli = Cli {
            iterations: Some("2k".to_string()),
            formula: Some(FormulaType::Expanded),
            repeat: Some(3),
            compact_json: true,
            ..Default::default()
        };

        let merged = merge_cli_with_config(&cli, base).unwrap();
        assert_eq!(merged.series.iterations, 2_000);
        assert_eq!(merged.series.coeff_b, 3.0); // untouched by CLI
        assert_eq!(merged.run.formula, Formula::Expanded);
        assert_eq!(merged.run.repeat, 3);
        assert!(!merged.output.pretty_json);
    }

    #[test]
    fn test_merge_cli_without_arguments_keeps_base() {
        let base = parse_toml_string("[run]\nrepeat = 4\nverify_formulas = true").unwrap();
        let merged = merge_cli_with_config(&Cli::default(), base.clone()).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_cli_invalid_iterations() {
        let cli = Cli {
            iterations: Some("lots".to_string()),
            ..Default::default()
        };
        assert!(merge_cli_with_config(&cli, Config::default()).is_err());
    }
}
