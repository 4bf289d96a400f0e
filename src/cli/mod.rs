//! Command-line parsing for the scour/pushover analysis toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "scour",
    version,
    about = "Bilinear pushover fitting and probabilistic scour hazard sampling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a bilinear force-displacement profile to a pushover CSV.
    Fit(FitArgs),
    /// Sample the 50-year scour depth hazard by Latin Hypercube.
    Hazard(HazardArgs),
    /// Combine previously exported hazard batches into one.
    Combine(CombineArgs),
}

/// Options for `scour fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Pushover CSV with displacement and force columns.
    #[arg(long)]
    pub csv: PathBuf,

    /// Displacement column name.
    #[arg(long, default_value = "disp")]
    pub d_col: String,

    /// Force column name.
    #[arg(long, default_value = "force")]
    pub f_col: String,

    /// Number of candidate yield displacements to scan.
    #[arg(long, default_value_t = 200)]
    pub grid_size: usize,

    /// Write the fit result to this JSON file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for `scour hazard`.
#[derive(Debug, Parser, Clone)]
pub struct HazardArgs {
    /// Number of Latin Hypercube samples per batch.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub sample_count: usize,

    /// Upstream flow velocity (m/s).
    #[arg(long, default_value_t = 10.0)]
    pub velocity: f64,

    /// Pier diameter (m).
    #[arg(long, default_value_t = 2.0)]
    pub pier_diameter: f64,

    /// Kinematic water viscosity (m^2/s).
    #[arg(long, default_value_t = 1e-6)]
    pub viscosity: f64,

    /// Initial scour rate (mm/hr).
    #[arg(long, default_value_t = 8.0)]
    pub scour_rate: f64,

    /// Reynolds number override (computed from the hydraulics if omitted).
    #[arg(long)]
    pub reynolds: Option<f64>,

    /// RNG seed; batch i uses seed + i.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of independent batches to run (in parallel) and combine.
    #[arg(long, default_value_t = 1)]
    pub batches: usize,

    /// Rows in the printed exceedance table (0 disables it).
    #[arg(long, default_value_t = 20)]
    pub table_rows: usize,

    /// Write the hazard result to this JSON file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for `scour combine`.
#[derive(Debug, Parser, Clone)]
pub struct CombineArgs {
    /// Hazard JSON files exported by `scour hazard`.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Rows in the printed exceedance table (0 disables it).
    #[arg(long, default_value_t = 20)]
    pub table_rows: usize,

    /// Write the combined result to this JSON file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}
