//! Levenberg–Marquardt fit of the anisotropy constants.
//!
//! Given:
//! - sweep angles `θ_i` (synthetic, see `angle_grid`)
//! - observed moments `m_i`
//! - an initial guess for `(k1, k2)`
//!
//! we iterate damped Gauss–Newton steps
//!
//! ```text
//! (JᵀJ + λ D²) δ = Jᵀ r
//! ```
//!
//! accepting a step only when it lowers the sum of squared residuals, and
//! adapting `λ` by a factor of 10 either way.
//!
//! Convergence (any one suffices):
//! - `r = 0` exactly, or `r` is orthogonal to every column of `J` (`gtol`)
//! - an accepted step lowers the SSE by less than `ftol` relative
//! - the step is smaller than `xtol` relative to the parameters
//!
//! Failure is reported, never papered over with the initial guess.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use crate::domain::{AnisotropyFit, FitOptions, MeasurementSeries};
use crate::error::AnalysisError;
use crate::fit::sweep_angles;
use crate::math::{condition_ratio, solve_damped_least_squares};
use crate::models::{PARAM_COUNT, anisotropy_moment, fill_jacobian_row};

/// Lower bound for `λ` once steps keep succeeding.
const DAMPING_MIN: f64 = 1e-10;

/// Upper bound for `λ`; past this no acceptable step exists.
const DAMPING_MAX: f64 = 1e16;

/// Singular-value ratio below which the Jacobian counts as rank-deficient.
const RANK_TOLERANCE: f64 = 1e-10;

/// Fit `(k1, k2)` to the moment series on the synthetic sweep angles.
pub fn fit_anisotropy(series: &MeasurementSeries, opts: &FitOptions) -> Result<AnisotropyFit, AnalysisError> {
    let theta = sweep_angles(series.len());
    fit_anisotropy_at(&theta, series.moment(), opts)
}

/// Fit `(k1, k2)` to `moment` observed at explicit angles (radians).
pub fn fit_anisotropy_at(theta: &[f64], moment: &[f64], opts: &FitOptions) -> Result<AnisotropyFit, AnalysisError> {
    validate_inputs(theta, moment, opts)?;
    let n = moment.len();

    // The model is linear in (k1, k2), so J does not depend on the parameters.
    let jacobian = build_jacobian(theta);
    let rank_deficient = condition_ratio(&jacobian) < RANK_TOLERANCE;
    if rank_deficient {
        warn!("anisotropy fit: cos 2θ and cos 4θ are collinear on {n} sweep angles; only k1 + k2 is identified");
    }
    let scale = DVector::<f64>::from_iterator(PARAM_COUNT, jacobian.column_iter().map(|c| c.norm()));
    let y = DVector::<f64>::from_column_slice(moment);

    let mut params = DVector::<f64>::from_row_slice(&[opts.initial_k1, opts.initial_k2]);
    let mut residuals = compute_residuals(theta, &y, &params);
    let mut sse = residuals.norm_squared();
    if !sse.is_finite() {
        return Err(AnalysisError::Fit("non-finite residuals at the initial guess".to_string()));
    }
    let mut damping = opts.initial_damping;

    for iteration in 1..=opts.max_iterations {
        if sse == 0.0 || gradient_converged(&jacobian, &residuals, opts.gtol) {
            return Ok(finish(&params, sse, n, iteration - 1, rank_deficient));
        }

        let step = solve_damped_least_squares(&jacobian, &residuals, damping, &scale).ok_or_else(|| {
            AnalysisError::Fit(format!("damped step could not be solved at iteration {iteration}"))
        })?;
        let step_small = step.norm() <= opts.xtol * (params.norm() + opts.xtol);

        let trial = &params + &step;
        let trial_residuals = compute_residuals(theta, &y, &trial);
        let trial_sse = trial_residuals.norm_squared();

        if trial_sse.is_finite() && trial_sse < sse {
            let reduction = (sse - trial_sse) / sse;
            params = trial;
            residuals = trial_residuals;
            sse = trial_sse;
            damping = (damping / 10.0).max(DAMPING_MIN);
            debug!("lm iteration {iteration}: accepted, sse={sse:.6e}, damping={damping:.1e}");

            if reduction <= opts.ftol || step_small {
                return Ok(finish(&params, sse, n, iteration, rank_deficient));
            }
        } else {
            damping *= 10.0;
            debug!("lm iteration {iteration}: rejected, trial_sse={trial_sse:.6e}, damping={damping:.1e}");

            if step_small {
                return Ok(finish(&params, sse, n, iteration, rank_deficient));
            }
            if damping > DAMPING_MAX {
                return Err(AnalysisError::Fit(format!(
                    "no step reduces the residual (damping exceeded {DAMPING_MAX:e} at iteration {iteration})"
                )));
            }
        }
    }

    Err(AnalysisError::Fit(format!(
        "did not converge within {} iterations (sse={sse:.6e})",
        opts.max_iterations
    )))
}

fn validate_inputs(theta: &[f64], moment: &[f64], opts: &FitOptions) -> Result<(), AnalysisError> {
    if theta.len() != moment.len() {
        return Err(AnalysisError::Dimension(format!(
            "{} angles but {} moments",
            theta.len(),
            moment.len()
        )));
    }
    if moment.len() < PARAM_COUNT {
        return Err(AnalysisError::Fit(format!(
            "need at least {PARAM_COUNT} samples to fit {PARAM_COUNT} parameters, got {}",
            moment.len()
        )));
    }
    if theta.iter().chain(moment.iter()).any(|v| !v.is_finite()) {
        return Err(AnalysisError::Fit("non-finite input to the anisotropy fit".to_string()));
    }
    if !(opts.initial_k1.is_finite() && opts.initial_k2.is_finite()) {
        return Err(AnalysisError::Fit("initial guess must be finite".to_string()));
    }
    if !(opts.initial_damping.is_finite() && opts.initial_damping > 0.0) {
        return Err(AnalysisError::Fit("initial damping must be finite and > 0".to_string()));
    }
    Ok(())
}

fn build_jacobian(theta: &[f64]) -> DMatrix<f64> {
    let mut jacobian = DMatrix::<f64>::zeros(theta.len(), PARAM_COUNT);
    let mut row = [0.0; PARAM_COUNT];
    for (i, &t) in theta.iter().enumerate() {
        fill_jacobian_row(t, &mut row);
        for (j, &v) in row.iter().enumerate() {
            jacobian[(i, j)] = v;
        }
    }
    jacobian
}

fn compute_residuals(theta: &[f64], y: &DVector<f64>, params: &DVector<f64>) -> DVector<f64> {
    DVector::<f64>::from_iterator(
        theta.len(),
        theta
            .iter()
            .zip(y.iter())
            .map(|(&t, &yi)| yi - anisotropy_moment(t, params[0], params[1])),
    )
}

/// Largest cosine between `r` and a column of `J`.
fn gradient_converged(jacobian: &DMatrix<f64>, residuals: &DVector<f64>, gtol: f64) -> bool {
    let r_norm = residuals.norm();
    if r_norm == 0.0 {
        return true;
    }
    let max_cos = jacobian
        .column_iter()
        .filter_map(|col| {
            let c_norm = col.norm();
            (c_norm > 0.0).then(|| col.dot(residuals).abs() / (c_norm * r_norm))
        })
        .fold(0.0, f64::max);
    max_cos <= gtol
}

fn finish(params: &DVector<f64>, sse: f64, n: usize, iterations: usize, rank_deficient: bool) -> AnisotropyFit {
    debug!("lm finished after {iterations} iteration(s): k1={:.6e}, k2={:.6e}", params[0], params[1]);
    AnisotropyFit {
        k1: params[0],
        k2: params[1],
        iterations,
        sse,
        rmse: (sse / n as f64).sqrt(),
        rank_deficient,
    }
}
