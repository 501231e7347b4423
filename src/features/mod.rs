//! Scalar features derived directly from the measurement series.
//!
//! Responsibilities:
//!
//! - saturation moment, coercivity, remanence (`extract`)
//! - net signed area under the moment-vs-field curve (`integrate`)
//! - differential susceptibility and its mean (`susceptibility`)
//!
//! Everything here is a pure function of a `MeasurementSeries`.

pub mod extract;
pub mod integrate;
pub mod susceptibility;

pub use extract::*;
pub use integrate::*;
pub use susceptibility::*;
