//! `vsm-analyser` library crate.
//!
//! Extracts standard magnetic parameters from a Vibrating Sample Magnetometer
//! field-vs-moment sweep: saturation moment, coercivity, remanence, net
//! magnetic moment, anisotropy constants `k1`/`k2` and mean differential
//! susceptibility.
//!
//! The binary (`vsm`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - a GUI or notebook front-end can call [`analyze`] directly

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod features;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

pub use app::pipeline::{RunOutput, analyze, run_analysis};
pub use domain::{AnalysisResult, MeasurementSeries};
pub use error::AnalysisError;
