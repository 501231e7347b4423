use thiserror::Error;

/// Every way a single analysis run can fail.
///
/// All variants are terminal for the run: nothing is retried and no default
/// values are substituted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Missing, empty, or malformed input file.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rows with the wrong number of columns, or mismatched series lengths.
    #[error("Dimension error: {0}")]
    Dimension(String),

    /// The anisotropy fit did not converge.
    #[error("Fit error: {0}")]
    Fit(String),

    /// A derived quantity is degenerate (e.g. nothing left to average).
    #[error("Computation error: {0}")]
    Computation(String),

    /// Writing an optional output file failed.
    #[error("Export error: {0}")]
    Export(String),
}

impl AnalysisError {
    /// Process exit code for the `vsm` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalysisError::Parse(_) | AnalysisError::Dimension(_) | AnalysisError::Export(_) => 2,
            AnalysisError::Computation(_) => 3,
            AnalysisError::Fit(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(AnalysisError::Parse("x".into()).exit_code(), 2);
        assert_eq!(AnalysisError::Dimension("x".into()).exit_code(), 2);
        assert_eq!(AnalysisError::Computation("x".into()).exit_code(), 3);
        assert_eq!(AnalysisError::Fit("x".into()).exit_code(), 4);
    }

    #[test]
    fn display_includes_category() {
        let err = AnalysisError::Fit("did not converge".into());
        assert_eq!(err.to_string(), "Fit error: did not converge");
    }
}
