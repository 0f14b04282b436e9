//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the selection engines
//! - exported to JSON/CSV
//! - fed into configuration files for repeated genetic runs

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SensorError;

/// Modal frequencies (Hz) of the 20-mode reference structure.
///
/// Used when a caller asks for tabulated frequencies instead of supplying its own.
pub const DEFAULT_MODAL_FREQUENCIES: [f64; 20] = [
    1.4407, 2.2387, 2.3951, 2.9588, 3.5732, 4.1455, 4.8339, 5.1074, 5.1398, 5.1825, 5.3577,
    7.1458, 7.3409, 7.4890, 8.8081, 9.6121, 9.9351, 10.022, 10.183, 11.182,
];

/// One candidate measurement location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable 1-based identifier.
    pub id: u32,
    /// Coordinates in millimetres.
    pub position: [f64; 3],
}

/// Ordered, immutable table of candidate nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTable {
    nodes: Vec<Node>,
}

impl NodeTable {
    /// Build a table from explicit nodes. Identifiers must be unique.
    pub fn new(nodes: Vec<Node>) -> Result<Self, SensorError> {
        if nodes.is_empty() {
            return Err(SensorError::ShapeMismatch("node table is empty".to_string()));
        }
        let mut ids: Vec<u32> = nodes.iter().map(|n| n.id).collect();
        ids.sort_unstable();
        if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(SensorError::ShapeMismatch(format!(
                "duplicate node identifier {}",
                w[0]
            )));
        }
        Ok(Self { nodes })
    }

    /// Build a table from coordinates, numbering nodes `1..=N` in order.
    pub fn from_positions(positions: &[[f64; 3]]) -> Result<Self, SensorError> {
        let nodes = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Node {
                id: (i + 1) as u32,
                position,
            })
            .collect();
        Self::new(nodes)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

/// Objective used to score a sensor subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Effective independence (Fisher information only).
    Efi,
    /// Effective independence weighted by driving-point residue.
    EfiDpr,
}

impl Method {
    pub fn display_name(self) -> &'static str {
        match self {
            Method::Efi => "EFI",
            Method::EfiDpr => "EFI-DPR",
        }
    }

    pub fn needs_frequencies(self) -> bool {
        matches!(self, Method::EfiDpr)
    }
}

/// Which engine produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Efi,
    EfiDpr,
    Genetic(Method),
}

impl Strategy {
    pub fn display_name(self) -> String {
        match self {
            Strategy::Efi => "EFI".to_string(),
            Strategy::EfiDpr => "EFI-DPR".to_string(),
            Strategy::Genetic(method) => format!("GA-{}", method.display_name()),
        }
    }

    /// File name suffix used by exports (`result{suffix}.csv`).
    pub fn file_suffix(self) -> &'static str {
        match self {
            Strategy::Efi => "",
            Strategy::EfiDpr => "_EFI_DPR",
            Strategy::Genetic(Method::Efi) => "_GA_EFI",
            Strategy::Genetic(Method::EfiDpr) => "_GA_EFI_DPR",
        }
    }
}

/// Raw engine output: selected row indices and one score per selected row.
///
/// `scores[i]` belongs to `indices[i]`. Scores are only comparable between
/// runs of the same strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub scores: Vec<f64>,
}

/// Presentation order for assembled results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep the order in which the engine reported the sensors.
    Selection,
    NodeIdAscending,
    NodeIdDescending,
}

/// One chosen sensor location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorPlacement {
    /// Row index into the mode-shape matrix.
    pub index: usize,
    pub node_id: u32,
    pub position: [f64; 3],
    pub contribution: f64,
}

/// Final, caller-owned record of one optimisation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub strategy: Strategy,
    pub sensors: Vec<SensorPlacement>,
}

impl SelectionResult {
    pub fn node_ids(&self) -> Vec<u32> {
        self.sensors.iter().map(|s| s.node_id).collect()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.sensors.iter().map(|s| s.index).collect()
    }

    pub fn total_contribution(&self) -> f64 {
        self.sensors.iter().map(|s| s.contribution).sum()
    }
}

/// Batch-size heuristic of the EFI elimination loop.
///
/// Each pass removes `max(min_batch, n_remove / batch_divisor)` DOFs, where
/// `n_remove` is the total number of DOFs to discard. `min_batch = 1` with a
/// large divisor reproduces classical one-at-a-time EFI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfiConfig {
    pub min_batch: usize,
    pub batch_divisor: usize,
}

impl Default for EfiConfig {
    fn default() -> Self {
        Self {
            min_batch: 100,
            batch_divisor: 10,
        }
    }
}

impl EfiConfig {
    pub fn validate(&self) -> Result<(), SensorError> {
        if self.min_batch == 0 {
            return Err(SensorError::InvalidConfig("EFI min_batch must be >= 1".to_string()));
        }
        if self.batch_divisor == 0 {
            return Err(SensorError::InvalidConfig(
                "EFI batch_divisor must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn batch_size(&self, n_remove: usize) -> usize {
        self.min_batch.max(n_remove / self.batch_divisor)
    }
}

/// Genetic search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Probability that a child receives one swap mutation.
    pub mutation_rate: f64,
    /// Chromosomes copied unchanged into the next generation.
    pub elite_size: usize,
    pub tournament_size: usize,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Evaluate fitness across the population with rayon.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 70,
            generations: 200,
            mutation_rate: 0.1,
            elite_size: 2,
            tournament_size: 3,
            seed: None,
            parallel: true,
        }
    }
}

impl GaConfig {
    pub fn validate(&self) -> Result<(), SensorError> {
        if self.generations == 0 {
            return Err(SensorError::InvalidConfig("generations must be >= 1".to_string()));
        }
        // Every child needs two distinct parents from the tournament pool.
        if self.population_size < self.elite_size + 2 {
            return Err(SensorError::InvalidConfig(format!(
                "population_size ({}) must be at least elite_size + 2 ({})",
                self.population_size,
                self.elite_size + 2
            )));
        }
        if self.tournament_size == 0 {
            return Err(SensorError::InvalidConfig(
                "tournament_size must be >= 1".to_string(),
            ));
        }
        if !(self.mutation_rate.is_finite() && (0.0..=1.0).contains(&self.mutation_rate)) {
            return Err(SensorError::InvalidConfig(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

/// A full `spo` run as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub plate: PlateSpec,
    pub target_sensors: usize,
    /// Replace the analytic frequencies with `DEFAULT_MODAL_FREQUENCIES`.
    pub tabulated_frequencies: bool,
    pub efi: EfiConfig,
    pub ga: GaConfig,
    pub order: SortOrder,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    /// Selected rows of the normalised mode-shape matrix.
    pub export_modes: Option<PathBuf>,
}

/// Synthetic simply supported plate used in place of loaded FE data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateSpec {
    /// Plate extent along x (mm).
    pub length: f64,
    /// Plate extent along y (mm).
    pub width: f64,
    /// Grid points along x.
    pub nx: usize,
    /// Grid points along y.
    pub ny: usize,
    pub modes: usize,
    /// Relative Gaussian noise added to every displacement (0 disables).
    pub noise: f64,
    pub seed: u64,
}
