//! Differential magnetic susceptibility `χ = Δm / ΔH`.

use log::warn;

use crate::domain::MeasurementSeries;
use crate::error::AnalysisError;
use crate::math::mean;

/// Discrete derivative between consecutive samples.
///
/// Pairs with `Δfield == 0` are left out of the output instead of producing an
/// infinite or NaN ratio, so the result may be shorter than `n - 1`.
pub fn differential_susceptibility(series: &MeasurementSeries) -> Vec<f64> {
    let field = series.field();
    let moment = series.moment();

    let mut out = Vec::with_capacity(field.len().saturating_sub(1));
    let mut skipped = 0usize;

    for (h, m) in field.windows(2).zip(moment.windows(2)) {
        let dh = h[1] - h[0];
        if dh == 0.0 {
            skipped += 1;
            continue;
        }
        out.push((m[1] - m[0]) / dh);
    }

    if skipped > 0 {
        warn!("skipped {skipped} susceptibility pair(s) with zero field step");
    }
    out
}

/// Mean of [`differential_susceptibility`].
///
/// Fails when no pair survives (single sample, or a constant field).
pub fn mean_susceptibility(series: &MeasurementSeries) -> Result<f64, AnalysisError> {
    average_susceptibility(&differential_susceptibility(series))
}

/// Mean of an already computed susceptibility sequence.
///
/// A non-finite slope (a field step so small the ratio overflows) or a
/// non-finite mean is a computation error.
pub fn average_susceptibility(chi: &[f64]) -> Result<f64, AnalysisError> {
    if let Some(i) = chi.iter().position(|v| !v.is_finite()) {
        return Err(AnalysisError::Computation(format!(
            "differential susceptibility of interval {i} is not finite ({})",
            chi[i]
        )));
    }

    let avg = mean(chi).ok_or_else(|| {
        AnalysisError::Computation(
            "no susceptibility values to average (no interval with a non-zero field step)".to_string(),
        )
    })?;
    if !avg.is_finite() {
        return Err(AnalysisError::Computation(format!(
            "mean differential susceptibility is not finite ({avg})"
        )));
    }
    Ok(avg)
}
