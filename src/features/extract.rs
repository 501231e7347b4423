//! Positional hysteresis features.
//!
//! These follow the instrument software conventions rather than textbook
//! definitions:
//! - coercivity is the field at the *minimum moment*, not a zero crossing
//! - remanence is the *last* recorded moment, not a `field == 0` lookup

use crate::domain::MeasurementSeries;

/// Largest moment in the series (A·m²).
pub fn saturation_moment(series: &MeasurementSeries) -> f64 {
    series
        .moment()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Field (T) recorded at the minimum moment.
///
/// Ties resolve to the first occurrence.
pub fn coercivity(series: &MeasurementSeries) -> f64 {
    let moment = series.moment();
    let mut min_idx = 0;
    for (i, &m) in moment.iter().enumerate().skip(1) {
        if m < moment[min_idx] {
            min_idx = i;
        }
    }
    series.field()[min_idx]
}

/// Moment (A·m²) at the final recorded point.
pub fn remanence(series: &MeasurementSeries) -> f64 {
    let moment = series.moment();
    moment[moment.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(field: &[f64], moment: &[f64]) -> MeasurementSeries {
        MeasurementSeries::new(field.to_vec(), moment.to_vec()).unwrap()
    }

    #[test]
    fn features_on_reference_sweep() {
        let s = series(&[0.0, 0.5, 1.0, -1.0], &[0.1, 0.08, 0.05, -0.1]);
        assert_eq!(saturation_moment(&s), 0.1);
        assert_eq!(coercivity(&s), -1.0);
        assert_eq!(remanence(&s), -0.1);
    }

    #[test]
    fn single_sample_features_are_that_sample() {
        let s = series(&[0.3], &[-0.02]);
        assert_eq!(saturation_moment(&s), -0.02);
        assert_eq!(coercivity(&s), 0.3);
        assert_eq!(remanence(&s), -0.02);
    }

    #[test]
    fn coercivity_ignores_zero_crossing() {
        // Moment crosses zero near field 0.0, but the minimum sits at 0.9.
        let s = series(&[-1.0, 0.0, 0.9, 1.0], &[0.5, 0.0, -0.7, -0.6]);
        assert_eq!(coercivity(&s), 0.9);
    }

    #[test]
    fn coercivity_tie_picks_first_minimum() {
        let s = series(&[0.1, 0.2, 0.3], &[-1.0, 0.0, -1.0]);
        assert_eq!(coercivity(&s), 0.1);
    }

    #[test]
    fn remanence_is_positional() {
        let a = series(&[1.0, 0.0, -1.0], &[0.2, 0.15, -0.2]);
        let b = series(&[1.0, 0.0, -1.0], &[0.2, 0.15, -0.19]);
        assert_eq!(remanence(&a), -0.2);
        assert_eq!(remanence(&b), -0.19);
    }
}
