//! Text ingest and unit normalization.
//!
//! This module turns a two-column VSM export (field in Oe, moment in emu) into
//! a `MeasurementSeries` in SI units.
//!
//! Design goals:
//! - **Strict schema**: every data row is exactly two finite numbers
//! - **Fail fast**: the first bad row aborts the load with its line number
//! - **Order preserving**: rows are never sorted or deduplicated
//! - **Separation of concerns**: no analysis logic here

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::domain::{DatasetStats, MeasurementSeries, RawSample};
use crate::error::AnalysisError;

/// Columns per data row: field (Oe), moment (emu).
const EXPECTED_COLUMNS: usize = 2;

/// Ingest output: normalized series + stats + line accounting.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub series: MeasurementSeries,
    pub stats: DatasetStats,
    /// Data rows parsed into samples.
    pub rows_used: usize,
    /// Blank and `#` comment lines that were ignored.
    pub lines_skipped: usize,
}

/// Load a measurement file and convert it to SI units.
pub fn load_series(path: &Path) -> Result<IngestedData, AnalysisError> {
    let text = fs::read_to_string(path).map_err(|e| {
        AnalysisError::Parse(format!("Failed to read '{}': {e}", path.display()))
    })?;

    let parsed = parse_samples(&text)?;
    let series = MeasurementSeries::from_raw(&parsed.samples)?;
    let stats = series.stats();

    info!(
        "loaded {} samples from '{}' ({} lines skipped)",
        parsed.samples.len(),
        path.display(),
        parsed.lines_skipped
    );

    Ok(IngestedData {
        series,
        stats,
        rows_used: parsed.samples.len(),
        lines_skipped: parsed.lines_skipped,
    })
}

/// Raw rows parsed from text, before unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSamples {
    pub samples: Vec<RawSample>,
    pub lines_skipped: usize,
}

/// Parse whitespace-delimited `(H_oe, m_emu)` rows.
///
/// Blank lines and lines starting with `#` are skipped. Any other line must
/// consist of exactly two finite numbers.
pub fn parse_samples(text: &str) -> Result<ParsedSamples, AnalysisError> {
    let mut samples = Vec::new();
    let mut lines_skipped = 0usize;
    // (line, column count) of the first data row, for shape errors.
    let mut first_row: Option<(usize, usize)> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim_start_matches('\u{feff}').trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            lines_skipped += 1;
            continue;
        }

        let values = parse_row(trimmed, line)?;
        let (first_line, first_cols) = *first_row.get_or_insert((line, values.len()));

        if values.len() != EXPECTED_COLUMNS {
            let message = if values.len() != first_cols {
                format!(
                    "inconsistent column count: line {line} has {} columns, line {first_line} has {first_cols}",
                    values.len()
                )
            } else {
                format!(
                    "line {line}: expected {EXPECTED_COLUMNS} columns, found {}",
                    values.len()
                )
            };
            return Err(AnalysisError::Dimension(message));
        }

        samples.push(RawSample {
            field_oe: values[0],
            moment_emu: values[1],
        });
    }

    if samples.is_empty() {
        return Err(AnalysisError::Parse("no data rows found".to_string()));
    }

    debug!("parsed {} rows, skipped {lines_skipped} lines", samples.len());
    Ok(ParsedSamples {
        samples,
        lines_skipped,
    })
}

fn parse_row(line_text: &str, line: usize) -> Result<Vec<f64>, AnalysisError> {
    line_text
        .split_whitespace()
        .map(|token| parse_value(token, line))
        .collect()
}

fn parse_value(token: &str, line: usize) -> Result<f64, AnalysisError> {
    let v = token
        .parse::<f64>()
        .map_err(|_| AnalysisError::Parse(format!("line {line}: '{token}' is not a number")))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AnalysisError::Parse(format!("line {line}: non-finite value '{token}'")))
    }
}
