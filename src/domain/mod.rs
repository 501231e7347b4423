//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and normalized measurement data (`RawSample`, `MeasurementSeries`)
//! - fit settings and outputs (`FitOptions`, `AnisotropyFit`)
//! - the run result and its export schema (`AnalysisResult`, `AnalysisFile`)

pub mod types;

pub use types::*;
