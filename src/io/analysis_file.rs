//! Read/write analysis JSON files.
//!
//! The analysis JSON is the hand-off to an external plot renderer:
//! - the normalized series (field vs moment)
//! - the three reference markers (saturation, coercivity, remanence)
//! - the full result and fit diagnostics
//!
//! The schema is defined by `domain::AnalysisFile`.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::{AnalysisFile, PlotMarkers, SeriesColumns};
use crate::error::AnalysisError;

/// Build the JSON payload for a finished run.
pub fn build_analysis_file(run: &RunOutput, source: &Path) -> AnalysisFile {
    let series = &run.ingest.series;
    AnalysisFile {
        tool: "vsm".to_string(),
        source: source.to_path_buf(),
        stats: run.ingest.stats,
        result: run.result,
        fit: run.fit,
        markers: PlotMarkers::from(&run.result),
        series: SeriesColumns {
            field_t: series.field().to_vec(),
            moment_am2: series.moment().to_vec(),
        },
    }
}

/// Write an analysis JSON file.
pub fn write_analysis_json(path: &Path, file: &AnalysisFile) -> Result<(), AnalysisError> {
    let out = File::create(path).map_err(|e| {
        AnalysisError::Export(format!("Failed to create analysis JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AnalysisError::Export(format!("Failed to write analysis JSON: {e}")))?;
    Ok(())
}

/// Read an analysis JSON file.
pub fn read_analysis_json(path: &Path) -> Result<AnalysisFile, AnalysisError> {
    let file = File::open(path).map_err(|e| {
        AnalysisError::Parse(format!("Failed to open analysis JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file).map_err(|e| AnalysisError::Parse(format!("Invalid analysis JSON: {e}")))
}
