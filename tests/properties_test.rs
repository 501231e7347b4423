//! Property tests for the feature functions and unit conversion.

use proptest::prelude::*;
use vsm_analyser::domain::{MeasurementSeries, RawSample};
use vsm_analyser::features::{coercivity, differential_susceptibility, magnetic_moment, remanence, saturation_moment};

fn series_from(field: Vec<f64>, moment: Vec<f64>) -> MeasurementSeries {
    MeasurementSeries::new(field, moment).unwrap()
}

fn pairs() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-2.0e4..2.0e4f64, -1.0e3..1.0e3f64), 1..64)
}

fn increasing_field(n: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    (-5.0..5.0f64, prop::collection::vec(1e-3..1.0f64, n)).prop_map(|(start, steps)| {
        let mut field = Vec::with_capacity(steps.len() + 1);
        field.push(start);
        for step in steps {
            let last = field[field.len() - 1];
            field.push(last + step);
        }
        field
    })
}

proptest! {
    #[test]
    fn unit_conversion_is_exact(raw in pairs()) {
        let samples: Vec<RawSample> = raw
            .iter()
            .map(|&(field_oe, moment_emu)| RawSample { field_oe, moment_emu })
            .collect();
        let series = MeasurementSeries::from_raw(&samples).unwrap();
        for (i, &(h, m)) in raw.iter().enumerate() {
            prop_assert_eq!(series.field()[i], h * 1e-4);
            prop_assert_eq!(series.moment()[i], m * 1e-3);
        }
    }

    #[test]
    fn saturation_is_order_independent(
        (original, shuffled) in pairs().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let (f1, m1): (Vec<f64>, Vec<f64>) = original.into_iter().unzip();
        let (f2, m2): (Vec<f64>, Vec<f64>) = shuffled.into_iter().unzip();
        let expected = m1.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(saturation_moment(&series_from(f1, m1)), expected);
        prop_assert_eq!(saturation_moment(&series_from(f2, m2)), expected);
    }

    #[test]
    fn coercivity_is_field_at_minimum_moment(raw in pairs()) {
        let (field, moment): (Vec<f64>, Vec<f64>) = raw.into_iter().unzip();
        let min = moment.iter().copied().fold(f64::INFINITY, f64::min);
        let series = series_from(field.clone(), moment.clone());

        let h = coercivity(&series);
        let tied: Vec<f64> = field
            .iter()
            .zip(moment.iter())
            .filter(|&(_, &m)| m == min)
            .map(|(&f, _)| f)
            .collect();
        prop_assert!(tied.contains(&h));
    }

    #[test]
    fn remanence_tracks_last_element(raw in pairs(), replacement in -1.0e3..1.0e3f64) {
        let (field, mut moment): (Vec<f64>, Vec<f64>) = raw.into_iter().unzip();
        let before = remanence(&series_from(field.clone(), moment.clone()));
        prop_assert_eq!(before, moment[moment.len() - 1]);

        let last = moment.len() - 1;
        moment[last] = replacement;
        prop_assert_eq!(remanence(&series_from(field, moment)), replacement);
    }

    #[test]
    fn constant_moment_integrates_to_rectangle(field in increasing_field(1..50), c in -10.0..10.0f64) {
        let n = field.len();
        let span = field[n - 1] - field[0];
        let series = series_from(field, vec![c; n]);

        let area = magnetic_moment(&series);
        prop_assert!((area - c * span).abs() <= 1e-9 * (1.0 + (c * span).abs()));
    }

    #[test]
    fn susceptibility_has_one_value_per_distinct_step(
        field in increasing_field(1..40),
        dup_at in any::<prop::sample::Index>(),
    ) {
        let n = field.len();
        let moment: Vec<f64> = (0..n).map(|i| (i as f64).sin()).collect();
        prop_assert_eq!(differential_susceptibility(&series_from(field.clone(), moment.clone())).len(), n - 1);

        // Repeat one field value: that pair disappears.
        let i = dup_at.index(n);
        let mut dup_field = field.clone();
        dup_field.insert(i, field[i]);
        let mut dup_moment = moment.clone();
        dup_moment.insert(i, moment[i] + 1.0);

        let chi = differential_susceptibility(&series_from(dup_field, dup_moment));
        prop_assert_eq!(chi.len(), n - 1);
        prop_assert!(chi.iter().all(|v| v.is_finite()));
    }
}
