//! Two-constant anisotropy model.
//!
//! ```text
//! m(θ) = -k1 cos(2θ) - k2 cos(4θ)
//! ```
//!
//! The fitter relies on two primitive operations:
//! - evaluate `m(θ)` for given constants (residuals, fitted curve)
//! - fill the Jacobian row `∂m/∂(k1, k2)` at `θ`

/// Number of free parameters (`k1`, `k2`).
pub const PARAM_COUNT: usize = 2;

/// Evaluate the model at angle `theta` (radians).
pub fn anisotropy_moment(theta: f64, k1: f64, k2: f64) -> f64 {
    -k1 * (2.0 * theta).cos() - k2 * (4.0 * theta).cos()
}

/// Fill `∂m/∂k1, ∂m/∂k2` at `theta`.
///
/// # Panics
/// Panics if `out` is shorter than `PARAM_COUNT`.
pub fn fill_jacobian_row(theta: f64, out: &mut [f64]) {
    out[0] = -(2.0 * theta).cos();
    out[1] = -(4.0 * theta).cos();
}
