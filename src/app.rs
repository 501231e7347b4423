//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - runs the analysis pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;
use log::info;

use crate::cli::{AnalyzeArgs, Command, FitArgs, ShowArgs};
use crate::domain::{AnalysisConfig, OutputFormat};
use crate::error::AnalysisError;

pub mod pipeline;

/// Entry point for the `vsm` binary.
pub fn run() -> Result<(), AnalysisError> {
    // `vsm data.txt` behaves like `vsm analyze data.txt`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Fit(args) => handle_fit(args),
        Command::Show(args) => handle_show(args),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = env_logger::Env::default().default_filter_or(default_level);
    // A logger may already be installed when embedded (e.g. in tests).
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AnalysisError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config)?;

    match config.format {
        OutputFormat::Text => println!("{}", crate::report::format_run_summary(&run)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&run.result)
                .map_err(|e| AnalysisError::Export(format!("Failed to serialize result: {e}")))?;
            println!("{json}");
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_series_csv(path, &run.ingest.series)?;
        info!("wrote series CSV to '{}'", path.display());
    }
    if let Some(path) = &config.export_json {
        let file = crate::io::analysis_file::build_analysis_file(&run, &config.input_path);
        crate::io::analysis_file::write_analysis_json(path, &file)?;
        info!("wrote analysis JSON to '{}'", path.display());
    }

    Ok(())
}

fn handle_fit(args: FitArgs) -> Result<(), AnalysisError> {
    let ingest = crate::io::ingest::load_series(&args.input)?;
    let fit = crate::fit::fit_anisotropy(&ingest.series, &args.fit_options())?;

    print!("{}", crate::report::format_dataset(&ingest.stats));
    print!("{}", crate::report::format_fit(&fit));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AnalysisError> {
    let file = crate::io::analysis_file::read_analysis_json(&args.analysis)?;

    println!("Source: {}", file.source.display());
    print!("{}", crate::report::format_dataset(&file.stats));
    println!();
    print!("{}", crate::report::format_key_parameters(&file.result));
    println!();
    print!("{}", crate::report::format_fit(&file.fit));
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        input_path: args.fit.input.clone(),
        fit: args.fit.fit_options(),
        format: args.format,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so a bare file path defaults to `analyze`.
///
/// Rules:
/// - `vsm`                         -> unchanged (clap prints usage)
/// - `vsm --help/--version/-h`     -> unchanged
/// - `vsm analyze|fit|show ...`    -> unchanged
/// - `vsm [-v...] data.txt ...`    -> `vsm [-v...] analyze data.txt ...`
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    // Skip leading verbosity flags; they are global and may precede the subcommand.
    let first = argv
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, a)| !is_verbosity_flag(a))
        .map(|(i, a)| (i, a.clone()));
    let Some((idx, arg)) = first else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg.as_str(), "analyze" | "fit" | "show");
    if is_subcommand || arg.starts_with('-') {
        return argv;
    }

    argv.insert(idx, "analyze".to_string());
    argv
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg == "--verbose" || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}
