//! Text renderings of an analysis run.
//!
//! Fixed-point values use 3 decimals; anisotropy constants and susceptibility
//! use scientific notation with 3 decimals and a signed two-digit exponent
//! (`1.234e-03`), the layout instrument reports conventionally use.

use crate::app::pipeline::RunOutput;
use crate::domain::{AnalysisResult, AnisotropyFit, DatasetStats};

/// Format the seven key parameters.
pub fn format_key_parameters(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("Key Parameters\n\n");
    out.push_str(&format!("Saturation moment: {:.3} Am^2\n", result.saturation_moment));
    out.push_str(&format!("Coercivity: {:.3} T\n", result.coercivity));
    out.push_str(&format!("Remanence: {:.3} Am^2\n", result.remanence));
    out.push_str(&format!("Magnetic moment: {:.3} Am^2\n", result.magnetic_moment));
    out.push_str(&format!(
        "Anisotropy constants: k1={} J/m^3, k2={} J/m^3\n",
        fmt_sci(result.k1),
        fmt_sci(result.k2)
    ));
    out.push_str(&format!(
        "Differential susceptibility: {} (unitless)\n",
        fmt_sci(result.mean_susceptibility)
    ));

    out
}

/// Format the full run summary (dataset stats + key parameters + fit diagnostics).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== vsm - VSM Hysteresis Analysis ===\n");
    out.push_str(&format_dataset(&run.ingest.stats));
    out.push('\n');
    out.push_str(&format_key_parameters(&run.result));
    out.push('\n');
    out.push_str(&format_fit(&run.fit));

    out
}

/// One-line dataset description.
pub fn format_dataset(stats: &DatasetStats) -> String {
    format!(
        "Samples: n={} | field=[{:.3}, {:.3}] T | moment=[{:.3}, {:.3}] Am^2\n",
        stats.n_points, stats.field_min, stats.field_max, stats.moment_min, stats.moment_max
    )
}

/// Anisotropy fit result plus convergence diagnostics.
pub fn format_fit(fit: &AnisotropyFit) -> String {
    let mut out = String::new();

    out.push_str("Anisotropy fit:\n");
    out.push_str(&format!("- k1: {} J/m^3\n", fmt_sci(fit.k1)));
    out.push_str(&format!("- k2: {} J/m^3\n", fmt_sci(fit.k2)));
    out.push_str(&format!(
        "- iterations={} SSE={} RMSE={}\n",
        fit.iterations,
        fmt_sci(fit.sse),
        fmt_sci(fit.rmse)
    ));
    if fit.rank_deficient {
        out.push_str("- note: cos 2θ and cos 4θ are collinear on this angle grid; only k1 + k2 is identified\n");
    }

    out
}

/// `{:.3e}` with the exponent padded to a signed two-digit field.
pub fn fmt_sci(v: f64) -> String {
    let s = format!("{v:.3e}");
    let Some((mantissa, exp)) = s.split_once('e') else {
        // inf / NaN
        return s;
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_sci_pads_exponent() {
        assert_eq!(fmt_sci(0.001234), "1.234e-03");
        assert_eq!(fmt_sci(-56789.0), "-5.679e+04");
        assert_eq!(fmt_sci(0.0), "0.000e+00");
        assert_eq!(fmt_sci(1.5e-120), "1.500e-120");
    }

    #[test]
    fn key_parameters_layout() {
        let result = AnalysisResult {
            saturation_moment: 0.1,
            coercivity: -1.0,
            remanence: -0.1,
            magnetic_moment: 0.1275,
            k1: 0.013,
            k2: 0.013,
            mean_susceptibility: 0.0625,
        };
        let expected = concat!(
            "Key Parameters\n\n",
            "Saturation moment: 0.100 Am^2\n",
            "Coercivity: -1.000 T\n",
            "Remanence: -0.100 Am^2\n",
            "Magnetic moment: 0.128 Am^2\n",
            "Anisotropy constants: k1=1.300e-02 J/m^3, k2=1.300e-02 J/m^3\n",
            "Differential susceptibility: 6.250e-02 (unitless)\n",
        );
        assert_eq!(format_key_parameters(&result), expected);
    }

    #[test]
    fn fit_block_mentions_collinearity_only_when_flagged() {
        let mut fit = AnisotropyFit {
            k1: 1.0,
            k2: 2.0,
            iterations: 5,
            sse: 0.0,
            rmse: 0.0,
            rank_deficient: false,
        };
        assert!(!format_fit(&fit).contains("collinear"));
        fit.rank_deficient = true;
        assert!(format_fit(&fit).contains("collinear"));
    }
}
