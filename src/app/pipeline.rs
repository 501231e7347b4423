//! Shared analysis pipeline used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> features -> integration -> susceptibility -> anisotropy fit
//!
//! Front-ends (the CLI here, or an external GUI) only do presentation.

use std::path::Path;

use log::info;

use crate::domain::{AnalysisConfig, AnalysisResult, AnisotropyFit, FitOptions, MeasurementSeries};
use crate::error::AnalysisError;
use crate::features::{
    average_susceptibility, coercivity, differential_susceptibility, magnetic_moment, remanence, saturation_moment,
};
use crate::fit::fit_anisotropy;
use crate::io::ingest::{IngestedData, load_series};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub result: AnalysisResult,
    pub fit: AnisotropyFit,
    /// Per-interval `Δm/ΔH`, zero field steps omitted.
    pub susceptibility: Vec<f64>,
}

/// Analyze a measurement file with default fit settings.
pub fn analyze(path: &Path) -> Result<AnalysisResult, AnalysisError> {
    run_analysis(&AnalysisConfig::for_path(path)).map(|run| run.result)
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AnalysisError> {
    let ingest = load_series(&config.input_path)?;
    run_analysis_with_data(ingest, &config.fit)
}

/// Execute the pipeline on already loaded data.
pub fn run_analysis_with_data(ingest: IngestedData, opts: &FitOptions) -> Result<RunOutput, AnalysisError> {
    let (result, fit, susceptibility) = analyze_series(&ingest.series, opts)?;
    Ok(RunOutput {
        ingest,
        result,
        fit,
        susceptibility,
    })
}

/// Compute every derived quantity for one series.
///
/// Stages run in a fixed order and the first failure ends the run; the
/// susceptibility average is checked before the (more expensive) fit.
pub fn analyze_series(
    series: &MeasurementSeries,
    opts: &FitOptions,
) -> Result<(AnalysisResult, AnisotropyFit, Vec<f64>), AnalysisError> {
    let saturation_moment = saturation_moment(series);
    let coercivity = coercivity(series);
    let remanence = remanence(series);
    let magnetic_moment = magnetic_moment(series);
    if !magnetic_moment.is_finite() {
        return Err(AnalysisError::Computation(format!(
            "magnetic moment integral is not finite ({magnetic_moment})"
        )));
    }

    let susceptibility = differential_susceptibility(series);
    let mean_susceptibility = average_susceptibility(&susceptibility)?;

    let fit = fit_anisotropy(series, opts)?;
    info!(
        "anisotropy fit converged in {} iteration(s), rmse={:.3e}",
        fit.iterations, fit.rmse
    );

    let result = AnalysisResult {
        saturation_moment,
        coercivity,
        remanence,
        magnetic_moment,
        k1: fit.k1,
        k2: fit.k2,
        mean_susceptibility,
    };
    Ok((result, fit, susceptibility))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::sweep_angles;
    use crate::models::anisotropy_moment;

    #[test]
    fn analyze_series_assembles_all_fields() {
        let theta = sweep_angles(37);
        let moment: Vec<f64> = theta.iter().map(|&t| anisotropy_moment(t, 0.01, 0.004)).collect();
        let field: Vec<f64> = (0..37).map(|i| i as f64 * 0.05).collect();
        let series = MeasurementSeries::new(field, moment).unwrap();

        let (result, fit, chi) = analyze_series(&series, &FitOptions::default()).unwrap();
        assert_eq!(result.saturation_moment, saturation_moment(&series));
        assert_eq!(result.coercivity, coercivity(&series));
        assert_eq!(result.remanence, series.moment()[36]);
        assert_eq!(result.k1, fit.k1);
        assert_eq!(chi.len(), 36);
        assert!((result.k1 - 0.01).abs() < 1e-9);
        assert!((result.k2 - 0.004).abs() < 1e-9);
    }

    #[test]
    fn single_sample_surfaces_computation_error() {
        let series = MeasurementSeries::new(vec![0.0], vec![0.1]).unwrap();
        let err = analyze_series(&series, &FitOptions::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Computation(_)));
    }

    #[test]
    fn overflowing_integral_is_a_computation_error() {
        let series = MeasurementSeries::new(vec![0.0, 1e300], vec![1e300, 1e300]).unwrap();
        let err = analyze_series(&series, &FitOptions::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Computation(msg) if msg.contains("magnetic moment")));
    }
}
