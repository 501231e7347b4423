//! Export the normalized series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per sample, SI units, recorded order.

use std::path::Path;

use serde::Serialize;

use crate::domain::MeasurementSeries;
use crate::error::AnalysisError;

#[derive(Debug, Serialize)]
struct SeriesRow {
    index: usize,
    field_t: f64,
    moment_am2: f64,
}

/// Write `index,field_t,moment_am2` rows to a CSV file.
pub fn write_series_csv(path: &Path, series: &MeasurementSeries) -> Result<(), AnalysisError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AnalysisError::Export(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    for (index, (field_t, moment_am2)) in series.points().enumerate() {
        writer
            .serialize(SeriesRow {
                index,
                field_t,
                moment_am2,
            })
            .map_err(|e| AnalysisError::Export(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AnalysisError::Export(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let series = MeasurementSeries::new(vec![0.5, -1.0], vec![0.08, -0.1]).unwrap();

        write_series_csv(&path, &series).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "index,field_t,moment_am2\n0,0.5,0.08\n1,-1.0,-0.1\n");
    }

    #[test]
    fn unwritable_path_is_an_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("series.csv");
        let series = MeasurementSeries::new(vec![0.0], vec![0.0]).unwrap();
        assert!(matches!(
            write_series_csv(&path, &series),
            Err(AnalysisError::Export(_))
        ));
    }
}
