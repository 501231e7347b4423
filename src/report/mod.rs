//! Reporting utilities: formatted terminal output.
//!
//! Formatting lives in one place so the math stays clean and output changes
//! stay localized.

pub mod format;

pub use format::*;
