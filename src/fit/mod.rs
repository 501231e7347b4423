//! Anisotropy curve fitting.
//!
//! Responsibilities:
//!
//! - generate the synthetic angle grid the fit is evaluated on
//! - run a Levenberg–Marquardt fit of `(k1, k2)` to the moment series

pub mod angle_grid;
pub mod fitter;

pub use angle_grid::*;
pub use fitter::*;
