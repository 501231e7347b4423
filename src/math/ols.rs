//! Linear least squares solvers.
//!
//! The anisotropy fit repeatedly solves small problems of the form:
//!
//! ```text
//! minimize ‖J δ - r‖² + λ ‖D δ‖²
//! ```
//!
//! (one Levenberg–Marquardt step). We stack the damping rows under `J` and
//! solve the augmented system as an ordinary least squares problem.
//!
//! Implementation choices:
//! - SVD handles tall and rank-deficient matrices. The evenly spaced angle grid
//!   makes the two model columns collinear for some sample counts, and SVD
//!   then returns the minimum-norm solution instead of failing.
//! - The parameter dimension is 2, so SVD cost is negligible next to building `J`.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if no tolerance yields a finite solution.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser singular-value cutoffs if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Solve one damped (Levenberg–Marquardt) step.
///
/// `scale` holds the per-parameter damping scale `D_jj`; columns with zero
/// scale are left undamped.
pub fn solve_damped_least_squares(
    jacobian: &DMatrix<f64>,
    residuals: &DVector<f64>,
    damping: f64,
    scale: &DVector<f64>,
) -> Option<DVector<f64>> {
    let n = jacobian.nrows();
    let p = jacobian.ncols();
    if residuals.len() != n || scale.len() != p {
        return None;
    }

    let mut a = DMatrix::<f64>::zeros(n + p, p);
    a.view_mut((0, 0), (n, p)).copy_from(jacobian);
    let sqrt_damping = damping.max(0.0).sqrt();
    for j in 0..p {
        a[(n + j, j)] = sqrt_damping * scale[j];
    }

    let mut b = DVector::<f64>::zeros(n + p);
    b.rows_mut(0, n).copy_from(residuals);

    solve_least_squares(&a, &b)
}

/// Ratio of the smallest to the largest singular value (0 for a zero matrix).
pub fn condition_ratio(x: &DMatrix<f64>) -> f64 {
    let sv = x.singular_values();
    let max = sv.iter().copied().fold(0.0, f64::max);
    let min = sv.iter().copied().fold(f64::INFINITY, f64::min);
    if max > 0.0 && min.is_finite() { min / max } else { 0.0 }
}
