//! JSON output formatting
//!
//! Serializes a [`RunReport`] together with run metadata (version, host, start
//! time). Non-finite results serialize as `null`, following serde_json.

use crate::runner::{FormulaCheck, RunReport};
use crate::util::time::format_duration;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

/// Duration with both seconds and human-readable format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDuration {
    pub nanos: u64,
    pub seconds: f64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            nanos: d.as_nanos() as u64,
            seconds: d.as_secs_f64(),
            human: format_duration(d),
        }
    }
}

/// Run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRunInfo {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub start_time: String,
}

/// Series parameters and formula
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonParameters {
    pub iterations: i64,
    pub coeff_a: f64,
    pub coeff_b: f64,
    pub formula: String,
    pub warmup: usize,
}

/// One timed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSample {
    pub run: usize,
    pub value: f64,
    pub elapsed: JsonDuration,
}

/// Timing summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub runs: usize,
    pub min: JsonDuration,
    pub max: JsonDuration,
    pub mean: JsonDuration,
    pub median: JsonDuration,
    pub std_dev: JsonDuration,
    pub terms_per_sec: f64,
}

/// Formula cross-check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFormulaCheck {
    pub reference: String,
    pub reference_value: f64,
    pub absolute_difference: f64,
    pub relative_difference: f64,
    pub ulps: u64,
    pub tolerance: f64,
    pub within_tolerance: bool,
}

impl From<&FormulaCheck> for JsonFormulaCheck {
    fn from(check: &FormulaCheck) -> Self {
        Self {
            reference: check.reference.to_string(),
            reference_value: check.reference_value,
            absolute_difference: check.divergence.absolute,
            relative_difference: check.divergence.relative,
            ulps: check.divergence.ulps,
            tolerance: check.tolerance,
            within_tolerance: check.within_tolerance,
        }
    }
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub run_info: JsonRunInfo,
    pub parameters: JsonParameters,
    /// Scaled result of the last timed run
    pub result: f64,
    pub execution_time: JsonDuration,
    pub deterministic: bool,
    pub samples: Vec<JsonSample>,
    pub summary: JsonSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_check: Option<JsonFormulaCheck>,
}

/// Build the JSON document for a report
pub fn build_json_report(report: &RunReport, hostname: Option<String>) -> JsonReport {
    let summary = &report.summary;

    JsonReport {
        run_info: JsonRunInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            hostname,
            start_time: report.started_at.to_rfc3339(),
        },
        parameters: JsonParameters {
            iterations: report.params.iterations,
            coeff_a: report.params.coeff_a,
            coeff_b: report.params.coeff_b,
            formula: report.formula.to_string(),
            warmup: report.warmup,
        },
        result: report.result(),
        execution_time: JsonDuration::from_duration(report.elapsed()),
        deterministic: report.deterministic,
        samples: report
            .samples
            .iter()
            .enumerate()
            .map(|(run, s)| JsonSample {
                run,
                value: s.value,
                elapsed: JsonDuration::from_duration(s.elapsed),
            })
            .collect(),
        summary: JsonSummary {
            runs: summary.runs,
            min: JsonDuration::from_duration(summary.min),
            max: JsonDuration::from_duration(summary.max),
            mean: JsonDuration::from_duration(summary.mean),
            median: JsonDuration::from_duration(summary.median),
            std_dev: JsonDuration::from_duration(summary.std_dev),
            terms_per_sec: report.terms_per_second(),
        },
        formula_check: report.formula_check.as_ref().map(JsonFormulaCheck::from),
    }
}

/// Get the local hostname, if it is valid UTF-8
pub fn local_hostname() -> Option<String> {
    hostname::get().ok().and_then(|h| h.into_string().ok())
}

/// Write the report as JSON
pub fn write_json_output(output_path: &Path, report: &RunReport, pretty: bool) -> Result<()> {
    let document = build_json_report(report, local_hostname());

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    let writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(writer, &document)?;
    } else {
        serde_json::to_writer(writer, &document)?;
    }

    Ok(())
}
