//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - builds the synthetic structure
//! - runs the requested selection engines
//! - prints reports
//! - writes optional exports

use std::fs::File;
use std::path::Path;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command, CommonArgs, EfiArgs, GaArgs};
use crate::domain::{EfiConfig, GaConfig, Method, PlateSpec, RunConfig, Strategy};
use crate::error::SensorError;

pub mod pipeline;

/// Entry point for the `spo` binary.
pub fn run() -> Result<(), SensorError> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let (config, strategies) = match cli.command {
        Command::Efi { common, efi } => (
            run_config(&common, Some(&efi), None)?,
            vec![Strategy::Efi],
        ),
        Command::EfiDpr { common } => (run_config(&common, None, None)?, vec![Strategy::EfiDpr]),
        Command::Ga { common, ga } => {
            let method = ga.method;
            (
                run_config(&common, None, Some(&ga))?,
                vec![Strategy::Genetic(method)],
            )
        }
        Command::Compare { common, efi, ga } => (
            run_config(&common, Some(&efi), Some(&ga))?,
            vec![
                Strategy::Efi,
                Strategy::EfiDpr,
                Strategy::Genetic(Method::Efi),
                Strategy::Genetic(Method::EfiDpr),
            ],
        ),
    };

    let output = pipeline::run_strategies(&config, &strategies)?;

    println!(
        "{}",
        crate::report::format_model_summary(&output.model, &config.plate, &output.frequencies)
    );
    for result in &output.results {
        println!("{}", crate::report::format_result(result));
    }
    if output.results.len() > 1 {
        println!("{}", crate::report::format_comparison(&output.results));
    }

    pipeline::write_exports(&config, &output)?;
    info!(strategies = output.results.len(), "optimisation completed");
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run_config(
    common: &CommonArgs,
    efi: Option<&EfiArgs>,
    ga: Option<&GaArgs>,
) -> Result<RunConfig, SensorError> {
    let efi = efi.map_or_else(EfiConfig::default, |a| EfiConfig {
        min_batch: a.min_batch,
        batch_divisor: a.batch_divisor,
    });
    let ga = match ga {
        Some(a) => ga_config_from_args(a)?,
        None => GaConfig::default(),
    };

    Ok(RunConfig {
        plate: PlateSpec {
            length: common.length,
            width: common.width,
            nx: common.nx,
            ny: common.ny,
            modes: common.modes,
            noise: common.noise,
            seed: common.plate_seed,
        },
        target_sensors: common.sensors,
        tabulated_frequencies: common.tabulated_frequencies,
        efi,
        ga,
        order: common.order,
        export_csv: common.export.clone(),
        export_json: common.export_json.clone(),
        export_modes: common.export_modes.clone(),
    })
}

fn ga_config_from_args(args: &GaArgs) -> Result<GaConfig, SensorError> {
    if let Some(path) = &args.ga_config {
        return read_ga_config(path);
    }
    Ok(GaConfig {
        population_size: args.population,
        generations: args.generations,
        mutation_rate: args.mutation_rate,
        elite_size: args.elite,
        tournament_size: args.tournament,
        seed: args.seed,
        parallel: !args.serial,
    })
}

/// Read GA parameters from JSON. Missing fields take their defaults.
pub fn read_ga_config(path: &Path) -> Result<GaConfig, SensorError> {
    let file = File::open(path).map_err(|e| {
        SensorError::Io(format!("Failed to open GA config '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file)
        .map_err(|e| SensorError::InvalidConfig(format!("Invalid GA config JSON: {e}")))
}
