//! Synthetic angle grid for the anisotropy fit.
//!
//! The input format has no angle column, so the fit assumes the recorded
//! moments correspond index-for-index to a uniform sweep over `[0°, 360°]`
//! (both ends included). The measured field plays no part in the angles.

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// `n == 1` yields `[start]`; the last value is exactly `stop` otherwise.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// `n` sweep angles in radians covering one full turn.
pub fn sweep_angles(n: usize) -> Vec<f64> {
    linspace(0.0, 360.0, n)
        .into_iter()
        .map(f64::to_radians)
        .collect()
}
