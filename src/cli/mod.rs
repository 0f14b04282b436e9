//! Command-line parsing for the sensor placement optimiser.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! selection engines.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Method, SortOrder};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "spo", version, about = "Optimal sensor placement by effective independence")]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Batch Effective Independence elimination.
    Efi {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        efi: EfiArgs,
    },
    /// One-shot ranking by EFI x driving-point residue.
    EfiDpr {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Genetic search over fixed-size sensor subsets.
    Ga {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        ga: GaArgs,
    },
    /// Run EFI, EFI-DPR and both GA objectives on the same structure.
    Compare {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        efi: EfiArgs,
        #[command(flatten)]
        ga: GaArgs,
    },
}

/// Structure, target and output options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Number of sensors to place.
    #[arg(short = 'n', long, default_value_t = 12)]
    pub sensors: usize,

    /// Plate length along x (mm).
    #[arg(long, default_value_t = 1200.0)]
    pub length: f64,

    /// Plate width along y (mm).
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    /// Candidate grid points along x.
    #[arg(long, default_value_t = 24)]
    pub nx: usize,

    /// Candidate grid points along y.
    #[arg(long, default_value_t = 16)]
    pub ny: usize,

    /// Number of vibration modes to preserve.
    #[arg(long, default_value_t = 8)]
    pub modes: usize,

    /// Gaussian noise added to the synthetic mode shapes (unit amplitude).
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Seed for the synthetic noise.
    #[arg(long, default_value_t = 42)]
    pub plate_seed: u64,

    /// Use the tabulated 20-mode reference frequencies instead of the plate's own.
    #[arg(long)]
    pub tabulated_frequencies: bool,

    /// Order of the printed/exported sensor list.
    #[arg(long, value_enum, default_value_t = SortOrder::NodeIdDescending)]
    pub order: SortOrder,

    /// Export per-sensor results to CSV (strategy suffix is appended).
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export full results to JSON (strategy suffix is appended).
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Export the selected rows of the mode-shape matrix to CSV.
    #[arg(long = "export-modes")]
    pub export_modes: Option<PathBuf>,
}

/// EFI batching heuristic.
#[derive(Debug, Args, Clone)]
pub struct EfiArgs {
    /// Minimum number of DOFs removed per elimination pass.
    #[arg(long, default_value_t = 100)]
    pub min_batch: usize,

    /// Each pass removes at least (total to remove) / divisor DOFs.
    #[arg(long, default_value_t = 10)]
    pub batch_divisor: usize,
}

/// Genetic search options.
#[derive(Debug, Args, Clone)]
pub struct GaArgs {
    /// Objective for the genetic search (ignored by `compare`, which runs both).
    #[arg(long, value_enum, default_value_t = Method::Efi)]
    pub method: Method,

    /// Load GA parameters from a JSON file; explicit flags below are ignored.
    #[arg(long, value_name = "JSON")]
    pub ga_config: Option<PathBuf>,

    #[arg(long, default_value_t = 70)]
    pub population: usize,

    #[arg(long, default_value_t = 200)]
    pub generations: usize,

    /// Probability of one swap mutation per child.
    #[arg(long, default_value_t = 0.1)]
    pub mutation_rate: f64,

    /// Chromosomes carried unchanged into the next generation.
    #[arg(long, default_value_t = 2)]
    pub elite: usize,

    #[arg(long, default_value_t = 3)]
    pub tournament: usize,

    /// RNG seed for a reproducible search.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Score the population on one thread.
    #[arg(long)]
    pub serial: bool,
}
