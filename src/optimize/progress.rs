//! Progress hook invoked at each EFI batch and each GA generation boundary.

use tracing::{debug, info};

/// A single observation point inside an engine run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// One EFI elimination pass finished.
    EfiBatch { removed: usize, remaining: usize },
    /// EFI-DPR ranked all candidates and kept the top slice.
    Ranked { selected: usize, candidates: usize },
    /// A GA generation was scored; `best_fitness` is the best seen so far.
    Generation { generation: usize, best_fitness: f64 },
    /// The GA exhausted its generation budget.
    Converged { generations: usize, best_fitness: f64 },
}

pub trait ProgressObserver {
    fn observe(&mut self, event: Progress);
}

impl<F: FnMut(Progress)> ProgressObserver for F {
    fn observe(&mut self, event: Progress) {
        self(event)
    }
}

/// Emits progress as `tracing` events.
///
/// GA generations are logged at `info` every tenth generation and at `debug`
/// otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn observe(&mut self, event: Progress) {
        match event {
            Progress::EfiBatch { removed, remaining } => {
                debug!(removed, remaining, "EFI batch eliminated");
            }
            Progress::Ranked {
                selected,
                candidates,
            } => {
                debug!(selected, candidates, "EFI-DPR ranking done");
            }
            Progress::Generation {
                generation,
                best_fitness,
            } => {
                if generation % 10 == 0 {
                    info!(generation, best_fitness, "GA generation");
                } else {
                    debug!(generation, best_fitness, "GA generation");
                }
            }
            Progress::Converged {
                generations,
                best_fitness,
            } => {
                info!(generations, best_fitness, "GA finished");
            }
        }
    }
}
