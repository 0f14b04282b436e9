//! EFI-DPR: one-shot ranking by effective independence × driving-point residue.
//!
//! Unlike batch EFI there is no elimination loop: every DOF is scored once by
//! `Ed_norm[i] * DPR_norm[i]` on the full model and the top `target` rows are
//! kept.
//!
//! Reported contributions are `Ed` recomputed on the selected rows, multiplied
//! by the DPR normalised over the *full* model (not re-normalised over the
//! subset), so scores stay on the same DPR scale the ranking used.

use crate::domain::{Selection, SelectionResult, SortOrder, Strategy};
use crate::error::SensorError;
use crate::math::{
    FisherInformation, ascending_order, driving_point_residue, normalize_by_max,
    validate_frequencies,
};
use crate::models::ModeShapeModel;
use crate::optimize::progress::{Progress, ProgressObserver, TracingObserver};
use crate::report::assemble;

/// Run EFI-DPR and return the assembled result.
pub fn optimize_effective_independence_dpr(
    model: &ModeShapeModel,
    target_sensors: usize,
    frequencies: &[f64],
) -> Result<SelectionResult, SensorError> {
    let selection =
        effective_independence_dpr(model, target_sensors, frequencies, &mut TracingObserver)?;
    assemble(model.nodes(), Strategy::EfiDpr, &selection, SortOrder::Selection)
}

/// Keep the `target_sensors` rows with the highest `Ed_norm * DPR_norm`.
///
/// Indices are returned in ascending score order (best last).
pub fn effective_independence_dpr(
    model: &ModeShapeModel,
    target_sensors: usize,
    frequencies: &[f64],
    observer: &mut dyn ProgressObserver,
) -> Result<Selection, SensorError> {
    let n_dofs = model.n_dofs();
    SensorError::check_target(target_sensors, n_dofs)?;
    validate_frequencies(frequencies, model.n_modes())?;

    let dpr = driving_point_residue(model.matrix(), frequencies);
    let dpr_norm = normalize_by_max(&dpr, "driving-point residue")?;

    let ed = FisherInformation::decompose(model.matrix())?.effective_independence();
    let ed_norm = normalize_by_max(&ed, "effective independence")?;

    let combined: Vec<f64> = ed_norm.iter().zip(&dpr_norm).map(|(e, d)| e * d).collect();
    let indices = ascending_order(&combined)[n_dofs - target_sensors..].to_vec();

    let ed_selected =
        FisherInformation::decompose(&model.rows(&indices))?.effective_independence();
    let scores = ed_selected
        .iter()
        .zip(&indices)
        .map(|(e, &i)| e * dpr_norm[i])
        .collect();

    observer.observe(Progress::Ranked {
        selected: target_sensors,
        candidates: n_dofs,
    });

    Ok(Selection { indices, scores })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::fixtures::{beam_frequencies, beam_model, two_ended_model};
    use approx::assert_abs_diff_eq;

    fn quiet() -> impl FnMut(Progress) {
        |_| {}
    }

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    #[test]
    fn equal_frequencies_pick_both_ends() {
        let model = two_ended_model();
        let sel = effective_independence_dpr(&model, 2, &[1.0, 1.0], &mut quiet()).unwrap();
        assert_eq!(sorted(sel.indices.clone()), vec![0, 9]);
        for score in &sel.scores {
            assert_abs_diff_eq!(*score, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn low_frequency_mode_dominates() {
        // Mode 2 is 100x stiffer, so its DOFs carry almost no residue.
        let model = two_ended_model();
        let sel = effective_independence_dpr(&model, 2, &[1.0, 100.0], &mut quiet()).unwrap();

        // Best last.
        assert_eq!(sel.indices, vec![1, 0]);

        // Rows [1, 0] and [0.5, 0] span one direction: Ed = [0.2, 0.8].
        // DPR_norm = [0.25, 1.0] from the full model.
        assert_abs_diff_eq!(sel.scores[0], 0.2 * 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(sel.scores[1], 0.8, epsilon = 1e-9);
    }

    #[test]
    fn returns_exactly_target_unique_indices() {
        let model = beam_model(50, 5);
        let freqs = beam_frequencies(5);
        for target in [1, 5, 20, 49] {
            let sel = effective_independence_dpr(&model, target, &freqs, &mut quiet()).unwrap();
            assert_eq!(sel.indices.len(), target);
            assert_eq!(sel.scores.len(), target);
            assert_eq!(sorted(sel.indices.clone()).windows(2).filter(|w| w[0] == w[1]).count(), 0);
        }
    }

    #[test]
    fn frequency_count_must_match_modes() {
        let model = two_ended_model();
        let err = effective_independence_dpr(&model, 2, &[1.0], &mut quiet()).unwrap_err();
        assert!(matches!(err, SensorError::ShapeMismatch(_)));
    }

    #[test]
    fn target_range_is_checked_before_frequencies() {
        let model = two_ended_model();
        let err = effective_independence_dpr(&model, 0, &[], &mut quiet()).unwrap_err();
        assert!(matches!(err, SensorError::InsufficientData { .. }));
        let err = effective_independence_dpr(&model, 10, &[1.0, 1.0], &mut quiet()).unwrap_err();
        assert!(matches!(err, SensorError::InsufficientData { .. }));
    }

    #[test]
    fn public_entry_point_reports_strategy() {
        let model = two_ended_model();
        let result = optimize_effective_independence_dpr(&model, 2, &[1.0, 1.0]).unwrap();
        assert_eq!(result.strategy, Strategy::EfiDpr);
        assert_eq!(result.sensors.len(), 2);
    }
}
