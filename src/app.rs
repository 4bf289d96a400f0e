//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds configs from them
//! - runs ingest/fit or sampling/combination
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, CombineArgs, Command, FitArgs, HazardArgs};
use crate::domain::{FitConfig, HazardConfig};
use crate::error::AppError;
use crate::io::ingest::IngestOptions;

/// Entry point for the `scour` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Hazard(args) => handle_hazard(args),
        Command::Combine(args) => handle_combine(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let options = IngestOptions {
        d_col: args.d_col.clone(),
        f_col: args.f_col.clone(),
    };

    let ingest = crate::io::ingest::load_sample_pairs(&args.csv, &options)?;
    if !ingest.row_errors.is_empty() {
        eprint!("{}", crate::report::format_row_errors(&ingest));
    }

    let fit = crate::fit::fit_bilinear(&ingest.samples.disp, &ingest.samples.force, &config)?;
    println!("{}", crate::report::format_fit_summary(&fit, &ingest, &config));

    if let Some(path) = &args.export {
        crate::io::export::write_fit_json(path, &fit, &config)?;
    }
    Ok(())
}

fn handle_hazard(args: HazardArgs) -> Result<(), AppError> {
    let config = hazard_config_from_args(&args);
    let result = crate::hazard::sample_hazard_batches(&config, args.batches)?;

    println!("{}", crate::report::format_hazard_summary(&result, args.table_rows));

    if let Some(path) = &args.export {
        // Combined multi-batch results carry no single config.
        let config = (args.batches == 1).then_some(&config);
        crate::io::export::write_hazard_json(path, &result, config)?;
    }
    Ok(())
}

fn handle_combine(args: CombineArgs) -> Result<(), AppError> {
    let mut batches = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        batches.push(crate::io::export::read_hazard_json(path)?.result);
    }
    let combined = crate::hazard::combine(&batches)?;

    println!("{}", crate::report::format_hazard_summary(&combined, args.table_rows));

    if let Some(path) = &args.export {
        crate::io::export::write_hazard_json(path, &combined, None)?;
    }
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        grid_size: args.grid_size,
    }
}

pub fn hazard_config_from_args(args: &HazardArgs) -> HazardConfig {
    HazardConfig {
        sample_count: args.sample_count,
        velocity: args.velocity,
        pier_diameter: args.pier_diameter,
        viscosity: args.viscosity,
        initial_scour_rate: args.scour_rate,
        reynolds: args.reynolds,
        seed: args.seed,
    }
}
