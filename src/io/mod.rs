//! Input/output helpers.
//!
//! - text ingest + unit normalization (`ingest`)
//! - normalized series export (CSV) (`export`)
//! - analysis JSON for plotting (`analysis_file`)

pub mod analysis_file;
pub mod export;
pub mod ingest;

pub use analysis_file::*;
pub use export::*;
pub use ingest::*;
