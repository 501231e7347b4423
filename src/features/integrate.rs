//! Trapezoidal integration of moment over field.

use crate::domain::MeasurementSeries;

/// Net signed area under the moment-vs-field curve, in series order.
///
/// Each interval contributes `(m[i] + m[i-1]) * (H[i] - H[i-1]) / 2`, so a
/// sweep that reverses direction partially cancels itself. A single sample
/// has no interval and integrates to `0.0`.
pub fn magnetic_moment(series: &MeasurementSeries) -> f64 {
    let field = series.field();
    let moment = series.moment();

    field
        .windows(2)
        .zip(moment.windows(2))
        .map(|(h, m)| (m[1] + m[0]) * (h[1] - h[0]) / 2.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(field: &[f64], moment: &[f64]) -> MeasurementSeries {
        MeasurementSeries::new(field.to_vec(), moment.to_vec()).unwrap()
    }

    #[test]
    fn reference_sweep_area() {
        // 0.045 + 0.0325 + 0.05
        let s = series(&[0.0, 0.5, 1.0, -1.0], &[0.1, 0.08, 0.05, -0.1]);
        assert!((magnetic_moment(&s) - 0.1275).abs() < 1e-12);
    }

    #[test]
    fn constant_moment_reduces_to_rectangle() {
        let s = series(&[-0.4, -0.1, 0.25, 0.8], &[0.3; 4]);
        assert!((magnetic_moment(&s) - 0.3 * 1.2).abs() < 1e-12);
    }

    #[test]
    fn reversed_sweep_cancels() {
        let s = series(&[0.0, 1.0, 0.0], &[0.2, 0.2, 0.2]);
        assert_eq!(magnetic_moment(&s), 0.0);
    }

    #[test]
    fn single_sample_is_zero() {
        let s = series(&[0.7], &[0.4]);
        assert_eq!(magnetic_moment(&s), 0.0);
    }
}
