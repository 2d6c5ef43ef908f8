//! piseries CLI entry point

use anyhow::{Context, Result};
use piseries::config::cli::Cli;
use piseries::config::{toml, validator, Config};
use piseries::output::{csv, json, text};
use piseries::runner::Runner;
use piseries::util::logging;
use piseries::util::time::{create_clock, MonotonicClock, SystemClock};
use tracing::debug;

fn main() -> Result<()> {
    let main_clock = SystemClock::new();

    // Parse CLI arguments
    let parse_start = main_clock.now();
    let cli = Cli::parse_args();
    let parse_elapsed = main_clock.elapsed_since(parse_start);

    // Build configuration; the config file may also enable debug logging
    let config_start = main_clock.now();
    let config = build_config_from_cli(&cli);
    let config_elapsed = main_clock.elapsed_since(config_start);

    logging::init(cli.debug || config.as_ref().map_or(false, |c| c.runtime.debug));
    debug!(elapsed_s = parse_elapsed.as_secs_f64(), "CLI parsed");
    debug!(elapsed_s = config_elapsed.as_secs_f64(), "configuration built");

    cli.validate()?;
    let config = config?;
    validator::validate_config(&config).context("Configuration validation failed")?;

    if config.runtime.dry_run {
        print!("{}", config);
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    run(&config)
}

/// Build configuration from CLI arguments, layered over a TOML file if given
fn build_config_from_cli(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => toml::parse_toml_file(path)?,
        None => Config::default(),
    };

    toml::merge_cli_with_config(cli, base)
}

/// Evaluate, print the report and write optional report files
fn run(config: &Config) -> Result<()> {
    let clock = create_clock(config.run.clock);
    let report = Runner::new(config, clock).run()?;

    text::print_results(&report).context("Failed to write results to stdout")?;

    if let Some(ref path) = config.output.json_output {
        json::write_json_output(path, &report, config.output.pretty_json)?;
        debug!(path = %path.display(), "JSON report written");
    }

    if let Some(ref path) = config.output.csv_output {
        csv::write_csv_output(path, &report)?;
        debug!(path = %path.display(), "CSV report written");
    }

    Ok(())
}
