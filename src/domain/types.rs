//! Shared domain types.
//!
//! These types are intentionally kept small and immutable once built:
//!
//! - the loader produces a `MeasurementSeries`
//! - the feature functions and the fitter read it
//! - the pipeline assembles an `AnalysisResult` that callers render or export

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// 1 Oe expressed in tesla.
pub const OERSTED_TO_TESLA: f64 = 1e-4;

/// 1 emu expressed in A·m².
pub const EMU_TO_AM2: f64 = 1e-3;

/// One on-disk row before unit conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Applied field in oersted.
    pub field_oe: f64,
    /// Measured moment in emu.
    pub moment_emu: f64,
}

impl RawSample {
    /// Field in tesla.
    pub fn field_tesla(&self) -> f64 {
        self.field_oe * OERSTED_TO_TESLA
    }

    /// Moment in A·m².
    pub fn moment_am2(&self) -> f64 {
        self.moment_emu * EMU_TO_AM2
    }
}

/// An ordered field-vs-moment sweep in SI units (T, A·m²).
///
/// Invariants, enforced by the constructors:
/// - `field` and `moment` have equal, non-zero length
/// - every value is finite
///
/// Order is significant (it encodes sweep direction) and is never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSeries {
    field: Vec<f64>,
    moment: Vec<f64>,
}

impl MeasurementSeries {
    pub fn new(field: Vec<f64>, moment: Vec<f64>) -> Result<Self, AnalysisError> {
        if field.len() != moment.len() {
            return Err(AnalysisError::Dimension(format!(
                "field has {} values but moment has {}",
                field.len(),
                moment.len()
            )));
        }
        if field.is_empty() {
            return Err(AnalysisError::Parse("measurement series is empty".to_string()));
        }
        if let Some(i) = field
            .iter()
            .zip(moment.iter())
            .position(|(f, m)| !f.is_finite() || !m.is_finite())
        {
            return Err(AnalysisError::Parse(format!("non-finite value at sample {i}")));
        }
        Ok(Self { field, moment })
    }

    /// Convert raw oersted/emu rows to SI, preserving their order.
    pub fn from_raw(samples: &[RawSample]) -> Result<Self, AnalysisError> {
        let field = samples.iter().map(RawSample::field_tesla).collect();
        let moment = samples.iter().map(RawSample::moment_am2).collect();
        Self::new(field, moment)
    }

    /// Field values in tesla.
    pub fn field(&self) -> &[f64] {
        &self.field
    }

    /// Moment values in A·m².
    pub fn moment(&self) -> &[f64] {
        &self.moment
    }

    pub fn len(&self) -> usize {
        self.field.len()
    }

    /// Always `false`: an empty series cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    /// `(field, moment)` pairs in recorded order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.field.iter().copied().zip(self.moment.iter().copied())
    }

    pub fn stats(&self) -> DatasetStats {
        let mut field_min = f64::INFINITY;
        let mut field_max = f64::NEG_INFINITY;
        let mut moment_min = f64::INFINITY;
        let mut moment_max = f64::NEG_INFINITY;

        for (f, m) in self.points() {
            field_min = field_min.min(f);
            field_max = field_max.max(f);
            moment_min = moment_min.min(m);
            moment_max = moment_max.max(m);
        }

        DatasetStats {
            n_points: self.len(),
            field_min,
            field_max,
            moment_min,
            moment_max,
        }
    }
}

/// Summary stats about the normalized series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub field_min: f64,
    pub field_max: f64,
    pub moment_min: f64,
    pub moment_max: f64,
}

/// The seven derived quantities of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// A·m².
    pub saturation_moment: f64,
    /// T.
    pub coercivity: f64,
    /// A·m².
    pub remanence: f64,
    /// Signed area under the moment-vs-field curve.
    pub magnetic_moment: f64,
    /// J/m³.
    pub k1: f64,
    /// J/m³.
    pub k2: f64,
    pub mean_susceptibility: f64,
}

/// Reference lines overlaid on the field-vs-moment plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotMarkers {
    pub saturation_moment: f64,
    pub coercivity: f64,
    pub remanence: f64,
}

impl From<&AnalysisResult> for PlotMarkers {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            saturation_moment: result.saturation_moment,
            coercivity: result.coercivity,
            remanence: result.remanence,
        }
    }
}

/// Outcome of the anisotropy fit, with convergence diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnisotropyFit {
    pub k1: f64,
    pub k2: f64,
    /// Number of trial steps evaluated.
    pub iterations: usize,
    pub sse: f64,
    pub rmse: f64,
    /// `cos 2θ` and `cos 4θ` were (numerically) collinear on the angle grid.
    pub rank_deficient: bool,
}

/// Levenberg–Marquardt settings for the anisotropy fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub initial_k1: f64,
    pub initial_k2: f64,
    pub max_iterations: usize,
    /// Stop when the relative SSE reduction of an accepted step falls below this.
    pub ftol: f64,
    /// Stop when the step is this small relative to the parameters.
    pub xtol: f64,
    /// Stop when the residual is this close to orthogonal to every Jacobian column.
    pub gtol: f64,
    pub initial_damping: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            initial_k1: 1e-3,
            initial_k2: 1e-3,
            max_iterations: 200,
            ftol: 1e-12,
            xtol: 1e-12,
            gtol: 1e-12,
            initial_damping: 1e-3,
        }
    }
}

/// How results are printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub fit: FitOptions,
    pub format: OutputFormat,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl AnalysisConfig {
    /// Defaults for everything except the input file.
    pub fn for_path(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            fit: FitOptions::default(),
            format: OutputFormat::Text,
            export_csv: None,
            export_json: None,
        }
    }
}

/// A saved analysis (JSON) for the external plot renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisFile {
    pub tool: String,
    pub source: PathBuf,
    pub stats: DatasetStats,
    pub result: AnalysisResult,
    pub fit: AnisotropyFit,
    pub markers: PlotMarkers,
    pub series: SeriesColumns,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesColumns {
    pub field_t: Vec<f64>,
    pub moment_am2: Vec<f64>,
}
