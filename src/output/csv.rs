//! CSV output formatting
//!
//! One row per timed run, suitable for pandas/R/spreadsheets:
//!
//! ```text
//! run,formula,iterations,coeff_a,coeff_b,result,elapsed_sec
//! ```

use crate::runner::{RunReport, RunSample};
use crate::series::{Formula, SeriesParameters};
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER: &str = "run,formula,iterations,coeff_a,coeff_b,result,elapsed_sec";

/// CSV writer for per-run samples
pub struct CsvWriter<W: Write> {
    out: W,
    rows: usize,
}

impl CsvWriter<BufWriter<File>> {
    /// Create the file and write the header row
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV output: {}", path.display()))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wrap a writer and write the header row
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "{}", HEADER)?;
        Ok(Self { out, rows: 0 })
    }

    /// Append one run
    pub fn append_sample(
        &mut self,
        formula: Formula,
        params: &SeriesParameters,
        sample: &RunSample,
    ) -> Result<()> {
        writeln!(
            self.out,
            "{},{},{},{},{},{:.15},{:.9}",
            self.rows,
            formula,
            params.iterations,
            params.coeff_a,
            params.coeff_b,
            sample.value,
            sample.elapsed.as_secs_f64()
        )?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Write every sample of a report to a CSV file
pub fn write_csv_output(path: &Path, report: &RunReport) -> Result<()> {
    let mut writer = CsvWriter::create(path)?;
    for sample in &report.samples {
        writer.append_sample(report.formula, &report.params, sample)?;
    }
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rows() {
        let params = SeriesParameters::new(2, 4.0, 1.0);
        let sample = RunSample {
            value: 4.0 * 263.0 / 315.0,
            elapsed: Duration::from_micros(12),
        };

        let mut writer = CsvWriter::new(Vec::new()).unwrap();
        writer.append_sample(Formula::Combined, &params, &sample).unwrap();
        writer.append_sample(Formula::Expanded, &params, &sample).unwrap();
        assert_eq!(writer.rows(), 2);

        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "0,combined,2,4,1,3.339682539682540,0.000012000");
        assert!(lines[2].starts_with("1,expanded,2,4,1,"));
    }

    #[test]
    fn test_write_csv_output() {
        use crate::config::Config;
        use crate::runner::Runner;
        use crate::util::time::ManualClock;

        let mut config = Config::default();
        config.series = SeriesParameters::new(10, 4.0, 1.0);
        config.run.repeat = 3;
        let report = Runner::new(&config, ManualClock::with_step(Duration::from_millis(1)))
            .run()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.csv");
        write_csv_output(&path, &report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().all(|l| l.split(',').count() == 7));
    }
}
