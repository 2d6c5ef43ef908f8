//! Human-readable text output
//!
//! The first two lines are a fixed contract:
//!
//! ```text
//! Result: <value, 12 fractional digits>
//! Execution Time: <seconds, 6 fractional digits> seconds
//! ```
//!
//! Everything else (repeat summary, formula cross-check) is only printed when the
//! corresponding option is enabled.

use crate::runner::{FormulaCheck, RunReport};
use crate::stats::TimingSummary;
use crate::util::time::{format_duration, format_rate};
use std::io::{self, Write};
use std::time::Duration;

/// `Result: <value>` with 12 fractional digits
pub fn format_result_line(value: f64) -> String {
    format!("Result: {:.12}", value)
}

/// `Execution Time: <seconds> seconds` with 6 fractional digits
pub fn format_time_line(elapsed: Duration) -> String {
    format!("Execution Time: {:.6} seconds", elapsed.as_secs_f64())
}

/// Print the report to stdout
pub fn print_results(report: &RunReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_results(&mut out, report)?;
    out.flush()
}

/// Write the report to any writer
pub fn write_results<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    writeln!(out, "{}", format_result_line(report.result()))?;
    writeln!(out, "{}", format_time_line(report.elapsed()))?;

    if report.samples.len() > 1 {
        writeln!(out)?;
        write_summary(out, &report.summary, report.terms_per_second())?;
        if !report.deterministic {
            writeln!(out, "  WARNING: results differed between runs")?;
        }
    }

    if let Some(ref check) = report.formula_check {
        writeln!(out)?;
        write_formula_check(out, report, check)?;
    }

    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summary: &TimingSummary, rate: f64) -> io::Result<()> {
    writeln!(out, "Timing ({} runs):", summary.runs)?;
    writeln!(out, "  Min:     {}", format_duration(summary.min))?;
    writeln!(out, "  Mean:    {}", format_duration(summary.mean))?;
    writeln!(out, "  Median:  {}", format_duration(summary.median))?;
    writeln!(out, "  Max:     {}", format_duration(summary.max))?;
    writeln!(out, "  Std Dev: {}", format_duration(summary.std_dev))?;
    writeln!(out, "  Rate:    {} terms/s", format_rate(rate))
}

fn write_formula_check<W: Write>(
    out: &mut W,
    report: &RunReport,
    check: &FormulaCheck,
) -> io::Result<()> {
    writeln!(out, "Formula cross-check:")?;
    writeln!(out, "  {:<9} {:.12}", report.formula.to_string() + ":", report.result())?;
    writeln!(out, "  {:<9} {:.12}", check.reference.to_string() + ":", check.reference_value)?;
    writeln!(out, "  Absolute difference: {:e}", check.divergence.absolute)?;
    writeln!(out, "  Relative difference: {:e}", check.divergence.relative)?;
    writeln!(out, "  ULPs apart:          {}", check.divergence.ulps)?;
    writeln!(
        out,
        "  Within tolerance {:e}: {}",
        check.tolerance,
        if check.within_tolerance { "yes" } else { "NO" }
    )
}
