//! Effective Independence (EFI) by batch elimination.
//!
//! Starting from every DOF, each pass decomposes the FIM of the remaining
//! rows, scores each row by its effective independence `Ed`, and drops the
//! lowest-scoring rows until `target` remain.
//!
//! Passes drop `EfiConfig::batch_size` rows at a time rather than one. This is
//! an approximation of classical EFI that trades some optimality for far
//! fewer decompositions on large models; `EfiConfig { min_batch: 1, .. }`
//! with a large divisor recovers one-at-a-time elimination.
//!
//! Ties in `Ed` fall to the stable sort: the lower original index is dropped
//! first.

use tracing::debug;

use crate::domain::{EfiConfig, Selection, SelectionResult, SortOrder, Strategy};
use crate::error::SensorError;
use crate::math::{FisherInformation, ascending_order};
use crate::models::ModeShapeModel;
use crate::optimize::progress::{Progress, ProgressObserver, TracingObserver};
use crate::report::assemble;

/// Run EFI with default batching and return the assembled result.
pub fn optimize_effective_independence(
    model: &ModeShapeModel,
    target_sensors: usize,
) -> Result<SelectionResult, SensorError> {
    let selection = effective_independence(
        model,
        target_sensors,
        &EfiConfig::default(),
        &mut TracingObserver,
    )?;
    assemble(model.nodes(), Strategy::Efi, &selection, SortOrder::Selection)
}

/// Reduce the model to `target_sensors` rows by batch EFI elimination.
///
/// Selected indices are returned in ascending order; `scores` holds `Ed`
/// computed on the final reduced matrix.
pub fn effective_independence(
    model: &ModeShapeModel,
    target_sensors: usize,
    config: &EfiConfig,
    observer: &mut dyn ProgressObserver,
) -> Result<Selection, SensorError> {
    let n_dofs = model.n_dofs();
    SensorError::check_target(target_sensors, n_dofs)?;
    config.validate()?;

    let batch = config.batch_size(n_dofs - target_sensors);
    debug!(n_dofs, target_sensors, batch, "starting EFI elimination");

    let mut remaining: Vec<usize> = (0..n_dofs).collect();
    let mut ed = FisherInformation::decompose(model.matrix())?.effective_independence();

    while remaining.len() > target_sensors {
        let n_drop = batch.min(remaining.len() - target_sensors);

        let mut keep = vec![true; remaining.len()];
        for &pos in ascending_order(&ed).iter().take(n_drop) {
            keep[pos] = false;
        }
        remaining = remaining
            .iter()
            .zip(&keep)
            .filter_map(|(&idx, &k)| k.then_some(idx))
            .collect();

        ed = FisherInformation::decompose(&model.rows(&remaining))?.effective_independence();
        observer.observe(Progress::EfiBatch {
            removed: n_drop,
            remaining: remaining.len(),
        });
    }

    Ok(Selection {
        indices: remaining,
        scores: ed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::fixtures::{beam_model, two_ended_model};
    use approx::assert_abs_diff_eq;

    fn quiet() -> impl FnMut(Progress) {
        |_| {}
    }

    #[test]
    fn keeps_the_two_independent_ends() {
        let model = two_ended_model();
        let sel = effective_independence(&model, 2, &EfiConfig::default(), &mut quiet()).unwrap();

        assert_eq!(sel.indices, vec![0, 9]);
        for score in &sel.scores {
            assert_abs_diff_eq!(*score, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn returns_exactly_target_unique_indices() {
        let model = beam_model(60, 4);
        for target in [4, 7, 25, 59] {
            let sel = effective_independence(&model, target, &EfiConfig::default(), &mut quiet())
                .unwrap();
            assert_eq!(sel.indices.len(), target);
            assert_eq!(sel.scores.len(), target);
            let mut dedup = sel.indices.clone();
            dedup.dedup();
            assert_eq!(dedup.len(), target);
            assert!(sel.indices.windows(2).all(|w| w[0] < w[1]));
            assert!(sel.indices.iter().all(|&i| i < 60));
        }
    }

    #[test]
    fn is_deterministic() {
        let model = beam_model(120, 5);
        let cfg = EfiConfig {
            min_batch: 7,
            batch_divisor: 10,
        };
        let a = effective_independence(&model, 12, &cfg, &mut quiet()).unwrap();
        let b = effective_independence(&model, 12, &cfg, &mut quiet()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reports_each_batch() {
        let model = beam_model(250, 3);
        let mut events = Vec::new();
        let mut record = |e: Progress| events.push(e);
        effective_independence(&model, 10, &EfiConfig::default(), &mut record).unwrap();

        // 240 to remove, batch = max(100, 24) = 100.
        assert_eq!(
            events,
            vec![
                Progress::EfiBatch {
                    removed: 100,
                    remaining: 150,
                },
                Progress::EfiBatch {
                    removed: 100,
                    remaining: 50,
                },
                Progress::EfiBatch {
                    removed: 40,
                    remaining: 10,
                },
            ]
        );
    }

    #[test]
    fn one_at_a_time_keeps_full_rank() {
        let model = beam_model(40, 4);
        let cfg = EfiConfig {
            min_batch: 1,
            batch_divisor: usize::MAX,
        };
        let sel = effective_independence(&model, 4, &cfg, &mut quiet()).unwrap();
        // A square, full-rank subset projects every row onto itself.
        for score in &sel.scores {
            assert_abs_diff_eq!(*score, 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn rejects_out_of_range_targets() {
        let model = two_ended_model();
        for target in [0, 10, 11] {
            let err = effective_independence(&model, target, &EfiConfig::default(), &mut quiet())
                .unwrap_err();
            assert!(matches!(err, SensorError::InsufficientData { .. }));
        }
    }

    #[test]
    fn public_entry_point_maps_node_ids() {
        let model = two_ended_model();
        let result = optimize_effective_independence(&model, 2).unwrap();
        assert_eq!(result.strategy, Strategy::Efi);
        assert_eq!(result.node_ids(), vec![1, 10]);
        assert_abs_diff_eq!(result.total_contribution(), 2.0, epsilon = 1e-9);
    }
}
