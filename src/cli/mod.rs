//! Command-line parsing for the VSM analyser.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analysis code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{FitOptions, OutputFormat};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "vsm", version, about = "VSM hysteresis analyser")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full analysis on a two-column (Oe, emu) text file.
    Analyze(AnalyzeArgs),
    /// Run only the anisotropy fit and print its diagnostics.
    Fit(FitArgs),
    /// Print the summary stored in a previously exported analysis JSON.
    Show(ShowArgs),
}

/// Options for the full analysis.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub fit: FitArgs,

    /// Output format for stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Export the normalized series (T, Am^2) to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Export series, markers and results to JSON for plotting.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Input file plus anisotropy fit settings.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Measurement file: whitespace-delimited field (Oe) and moment (emu) columns.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Initial guess for k1 (J/m^3).
    #[arg(long, default_value_t = FitOptions::default().initial_k1, allow_negative_numbers = true)]
    pub k1: f64,

    /// Initial guess for k2 (J/m^3).
    #[arg(long, default_value_t = FitOptions::default().initial_k2, allow_negative_numbers = true)]
    pub k2: f64,

    /// Maximum Levenberg-Marquardt iterations.
    #[arg(long = "max-iters", default_value_t = FitOptions::default().max_iterations)]
    pub max_iters: usize,
}

impl FitArgs {
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            initial_k1: self.k1,
            initial_k2: self.k2,
            max_iterations: self.max_iters,
            ..FitOptions::default()
        }
    }
}

/// Options for re-displaying a saved analysis.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Analysis JSON produced by `vsm analyze --export-json`.
    #[arg(value_name = "JSON")]
    pub analysis: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["vsm", "analyze", "data.txt"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.fit.input, PathBuf::from("data.txt"));
        assert_eq!(args.fit.fit_options(), FitOptions::default());
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.export_csv.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn fit_flags_override_options() {
        let cli = Cli::try_parse_from(["vsm", "-vv", "fit", "d.txt", "--k1", "-0.5", "--max-iters", "10"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let opts = args.fit_options();
        assert_eq!(opts.initial_k1, -0.5);
        assert_eq!(opts.initial_k2, 1e-3);
        assert_eq!(opts.max_iterations, 10);
        assert_eq!(cli.verbose, 2);
    }
}
