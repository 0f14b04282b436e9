//! Genetic search over fixed-cardinality sensor subsets.
//!
//! Each generation:
//! 1. score every chromosome (parallel when `GaConfig::parallel`)
//! 2. copy the `elite_size` fittest unchanged into the next generation
//! 3. fill the rest with tournament-selected parents, spliced by
//!    [`crossover`] and perturbed by [`mutate`]
//!
//! The run always spends its full generation budget; there is no early stop.
//! The best chromosome seen in *any* generation wins, so the reported
//! best-fitness history never decreases.
//!
//! Fitness:
//! - EFI: `Σ ln λ` over the FIM eigenvalues above `EIGENVALUE_FLOOR`
//! - EFI-DPR: the EFI fitness times the mean DPR of the selected rows,
//!   normalised by the subset's own maximum DPR

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use rayon::prelude::*;
use tracing::debug;

use crate::domain::{GaConfig, Method, Selection, SelectionResult, SortOrder, Strategy};
use crate::error::SensorError;
use crate::math::{
    FisherInformation, argmax, ascending_order, driving_point_residue, log_information,
    normalize_by_max, validate_frequencies,
};
use crate::models::ModeShapeModel;
use crate::optimize::chromosome::Chromosome;
use crate::optimize::operators::{crossover, mutate, tournament_select};
use crate::optimize::progress::{Progress, ProgressObserver, TracingObserver};
use crate::report::assemble;

/// Outcome of a genetic run.
#[derive(Debug, Clone)]
pub struct GeneticRun {
    /// Winning subset (ascending indices) with final contribution scores.
    pub selection: Selection,
    pub best_fitness: f64,
    /// Best fitness seen up to and including each generation.
    pub history: Vec<f64>,
    /// Population bred by the last generation.
    pub population: Vec<Chromosome>,
}

/// Run the GA and return the assembled result.
///
/// `frequencies` is required for `Method::EfiDpr`; `config` defaults to
/// `GaConfig::default()`.
pub fn optimize_genetic(
    model: &ModeShapeModel,
    target_sensors: usize,
    method: Method,
    frequencies: Option<&[f64]>,
    config: Option<&GaConfig>,
) -> Result<SelectionResult, SensorError> {
    let default_config = GaConfig::default();
    let config = config.unwrap_or(&default_config);
    let run = genetic_search(
        model,
        target_sensors,
        method,
        frequencies,
        config,
        &mut TracingObserver,
    )?;
    assemble(
        model.nodes(),
        Strategy::Genetic(method),
        &run.selection,
        SortOrder::Selection,
    )
}

/// Evolve `config.generations` generations and return the best subset found.
pub fn genetic_search(
    model: &ModeShapeModel,
    target_sensors: usize,
    method: Method,
    frequencies: Option<&[f64]>,
    config: &GaConfig,
    observer: &mut dyn ProgressObserver,
) -> Result<GeneticRun, SensorError> {
    let n_dofs = model.n_dofs();
    SensorError::check_target(target_sensors, n_dofs)?;
    config.validate()?;
    let objective = Objective::new(model, method, frequencies)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pop_size = config.population_size;
    let n_children = pop_size - config.elite_size;
    debug!(
        n_dofs,
        target_sensors,
        method = method.display_name(),
        pop_size,
        generations = config.generations,
        "starting genetic search"
    );

    let mut population: Vec<Chromosome> = (0..pop_size)
        .map(|_| Chromosome::random(n_dofs, target_sensors, &mut rng))
        .collect();
    let mut best: Option<(Chromosome, f64)> = None;
    let mut history = Vec::with_capacity(config.generations);

    for generation in 0..config.generations {
        let fitness = objective.evaluate_all(&population, config.parallel)?;

        if let Some(i) = argmax(&fitness) {
            let improved = match &best {
                Some((_, f)) => fitness[i] > *f,
                None => true,
            };
            if improved {
                best = Some((population[i].clone(), fitness[i]));
            }
        }
        let best_fitness = best.as_ref().map_or(f64::NEG_INFINITY, |(_, f)| *f);
        history.push(best_fitness);
        observer.observe(Progress::Generation {
            generation,
            best_fitness,
        });

        let order = ascending_order(&fitness);
        let mut next: Vec<Chromosome> = order[n_children..]
            .iter()
            .map(|&i| population[i].clone())
            .collect();

        let parents = tournament_select(&fitness, n_children, config.tournament_size, &mut rng);
        while next.len() < pop_size {
            let pair = index::sample(&mut rng, parents.len(), 2);
            let p1 = &population[parents[pair.index(0)]];
            let p2 = &population[parents[pair.index(1)]];
            let mut child = crossover(p1, p2, &mut rng);
            mutate(&mut child, config.mutation_rate, &mut rng);
            next.push(child);
        }
        population = next;
    }

    let Some((winner, best_fitness)) = best else {
        return Err(SensorError::InvalidConfig(
            "genetic search produced no scored generation".to_string(),
        ));
    };
    observer.observe(Progress::Converged {
        generations: config.generations,
        best_fitness,
    });

    let selection = objective.contributions(&winner.selected())?;
    Ok(GeneticRun {
        selection,
        best_fitness,
        history,
        population,
    })
}

/// Fitness of an explicit subset under `method`.
pub fn subset_fitness(
    model: &ModeShapeModel,
    indices: &[usize],
    method: Method,
    frequencies: Option<&[f64]>,
) -> Result<f64, SensorError> {
    Objective::new(model, method, frequencies)?.fitness(indices)
}

/// Per-run objective state. The full-model DPR is computed once; a subset
/// only needs its own maximum to normalise.
struct Objective<'a> {
    model: &'a ModeShapeModel,
    dpr: Option<Vec<f64>>,
}

impl<'a> Objective<'a> {
    fn new(
        model: &'a ModeShapeModel,
        method: Method,
        frequencies: Option<&[f64]>,
    ) -> Result<Self, SensorError> {
        let dpr = match method {
            Method::Efi => None,
            Method::EfiDpr => {
                let frequencies = frequencies.ok_or(SensorError::MissingFrequencies)?;
                validate_frequencies(frequencies, model.n_modes())?;
                Some(driving_point_residue(model.matrix(), frequencies))
            }
        };
        Ok(Self { model, dpr })
    }

    fn fitness(&self, indices: &[usize]) -> Result<f64, SensorError> {
        let efi = log_information(&self.model.rows(indices))?;
        let Some(dpr) = &self.dpr else {
            return Ok(efi);
        };

        let subset = subset_dpr(dpr, indices)?;
        let factor = subset.iter().sum::<f64>() / subset.len() as f64;
        Ok(efi * factor)
    }

    fn evaluate_all(
        &self,
        population: &[Chromosome],
        parallel: bool,
    ) -> Result<Vec<f64>, SensorError> {
        if parallel {
            population
                .par_iter()
                .map(|c| self.fitness(&c.selected()))
                .collect()
        } else {
            population.iter().map(|c| self.fitness(&c.selected())).collect()
        }
    }

    /// `Ed` on the subset, times subset-normalised DPR for EFI-DPR.
    fn contributions(&self, indices: &[usize]) -> Result<Selection, SensorError> {
        let ed = FisherInformation::decompose(&self.model.rows(indices))?.effective_independence();
        let scores = match &self.dpr {
            None => ed,
            Some(dpr) => {
                let subset_norm = subset_dpr(dpr, indices)?;
                ed.iter().zip(&subset_norm).map(|(e, d)| e * d).collect()
            }
        };
        Ok(Selection {
            indices: indices.to_vec(),
            scores,
        })
    }
}

/// DPR of the selected rows over their own maximum. Rows that never move
/// (all-zero subset) carry no residue and normalise to zero.
fn subset_dpr(dpr: &[f64], indices: &[usize]) -> Result<Vec<f64>, SensorError> {
    let subset: Vec<f64> = indices.iter().map(|&i| dpr[i]).collect();
    if subset.iter().all(|&v| v == 0.0) {
        return Ok(subset);
    }
    normalize_by_max(&subset, "driving-point residue")
}
