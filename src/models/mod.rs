//! Magnetocrystalline anisotropy model.
//!
//! The model is implemented as small, pure functions so that the fitter can
//! stay generic over how residuals and Jacobian rows are produced.

pub mod model;

pub use model::*;
