//! Shared "selection pipeline" used by every `spo` command.
//!
//! structure -> normalised model -> frequencies -> engines -> assembled results
//!
//! Keeping this in one place lets the commands differ only in which
//! strategies they request.

use crate::data::generate_plate;
use crate::domain::{DEFAULT_MODAL_FREQUENCIES, RunConfig, SelectionResult, Strategy};
use crate::error::SensorError;
use crate::io::{with_suffix, write_mode_matrix_csv, write_result_json, write_results_csv};
use crate::models::ModeShapeModel;
use crate::optimize::{
    TracingObserver, effective_independence, effective_independence_dpr, genetic_search,
};
use crate::report::assemble;

/// All computed outputs of a single `spo` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub model: ModeShapeModel,
    pub frequencies: Vec<f64>,
    pub results: Vec<SelectionResult>,
}

/// Build the normalised model and the frequencies the DPR objective uses.
pub fn build_model(config: &RunConfig) -> Result<(ModeShapeModel, Vec<f64>), SensorError> {
    let structure = generate_plate(&config.plate)?;
    let modes = config.plate.modes;

    let frequencies = if config.tabulated_frequencies {
        if modes > DEFAULT_MODAL_FREQUENCIES.len() {
            return Err(SensorError::ShapeMismatch(format!(
                "tabulated frequencies cover {} modes, {modes} requested",
                DEFAULT_MODAL_FREQUENCIES.len()
            )));
        }
        DEFAULT_MODAL_FREQUENCIES[..modes].to_vec()
    } else {
        structure.frequencies
    };

    let model = ModeShapeModel::build(structure.nodes, &structure.raw_modes, modes)?;
    Ok((model, frequencies))
}

/// Run each strategy on the same model, in order.
pub fn run_strategies(
    config: &RunConfig,
    strategies: &[Strategy],
) -> Result<RunOutput, SensorError> {
    let (model, frequencies) = build_model(config)?;
    let target = config.target_sensors;

    let mut results = Vec::with_capacity(strategies.len());
    for &strategy in strategies {
        let selection = match strategy {
            Strategy::Efi => {
                effective_independence(&model, target, &config.efi, &mut TracingObserver)?
            }
            Strategy::EfiDpr => {
                effective_independence_dpr(&model, target, &frequencies, &mut TracingObserver)?
            }
            Strategy::Genetic(method) => {
                genetic_search(
                    &model,
                    target,
                    method,
                    Some(&frequencies),
                    &config.ga,
                    &mut TracingObserver,
                )?
                .selection
            }
        };
        results.push(assemble(model.nodes(), strategy, &selection, config.order)?);
    }

    Ok(RunOutput {
        model,
        frequencies,
        results,
    })
}

/// Write whichever exports the config asks for, one file per strategy.
pub fn write_exports(config: &RunConfig, output: &RunOutput) -> Result<(), SensorError> {
    for result in &output.results {
        let suffix = result.strategy.file_suffix();
        if let Some(path) = &config.export_csv {
            write_results_csv(&with_suffix(path, suffix), result)?;
        }
        if let Some(path) = &config.export_json {
            write_result_json(&with_suffix(path, suffix), result)?;
        }
        if let Some(path) = &config.export_modes {
            let reduced = output.model.rows(&result.indices());
            write_mode_matrix_csv(&with_suffix(path, suffix), &reduced)?;
        }
    }
    Ok(())
}
