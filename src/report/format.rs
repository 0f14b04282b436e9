//! Formatted terminal output.
//!
//! We keep formatting code in one place so the engines stay free of
//! presentation concerns.

use crate::domain::{PlateSpec, SelectionResult};
use crate::models::ModeShapeModel;

/// Header describing the candidate model.
pub fn format_model_summary(
    model: &ModeShapeModel,
    plate: &PlateSpec,
    frequencies: &[f64],
) -> String {
    let mut out = String::new();
    out.push_str("=== spo - Sensor Placement Optimiser ===\n");
    out.push_str(&format!(
        "Structure: plate {:.0} x {:.0} mm | grid {} x {} | noise {:.3}\n",
        plate.length, plate.width, plate.nx, plate.ny, plate.noise
    ));
    out.push_str(&format!(
        "Candidates: {} DOFs | {} modes\n",
        model.n_dofs(),
        model.n_modes()
    ));
    let freqs: Vec<String> = frequencies.iter().map(|f| format!("{f:.3}")).collect();
    out.push_str(&format!("Frequencies (Hz): [{}]\n", freqs.join(", ")));
    out
}

/// Per-sensor listing for one result.
pub fn format_result(result: &SelectionResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\nSelected sensor positions ({}): {} sensors, total contribution {:.4}\n",
        result.strategy.display_name(),
        result.sensors.len(),
        result.total_contribution()
    ));
    for (i, s) in result.sensors.iter().enumerate() {
        out.push_str(&format!(
            "Sensor {:>3}: Node {:>5} at ({:.2}, {:.2}, {:.2})  contribution {:.4}\n",
            i + 1,
            s.node_id,
            s.position[0],
            s.position[1],
            s.position[2],
            s.contribution
        ));
    }
    out
}

/// Side-by-side node lists for several strategies on the same model.
pub fn format_comparison(results: &[SelectionResult]) -> String {
    let mut out = String::new();
    out.push_str("\nStrategy comparison (scores are not comparable across strategies):\n");

    let mut all_ids: Vec<Vec<u32>> = Vec::with_capacity(results.len());
    for r in results {
        let mut ids = r.node_ids();
        ids.sort_unstable();
        out.push_str(&format!(
            "{:<12} nodes {:?}\n",
            r.strategy.display_name(),
            ids
        ));
        all_ids.push(ids);
    }

    if let Some((first, rest)) = all_ids.split_first() {
        let shared: Vec<u32> = first
            .iter()
            .copied()
            .filter(|id| rest.iter().all(|ids| ids.binary_search(id).is_ok()))
            .collect();
        out.push_str(&format!("Common to all: {shared:?}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Method, SensorPlacement, Strategy};

    fn result(strategy: Strategy, ids: &[u32]) -> SelectionResult {
        SelectionResult {
            strategy,
            sensors: ids
                .iter()
                .map(|&id| SensorPlacement {
                    index: id as usize - 1,
                    node_id: id,
                    position: [id as f64, 0.0, 0.0],
                    contribution: 0.5,
                })
                .collect(),
        }
    }

    #[test]
    fn listing_numbers_sensors_from_one() {
        let text = format_result(&result(Strategy::Efi, &[4, 2]));
        assert!(text.contains("Sensor   1: Node     4"));
        assert!(text.contains("Sensor   2: Node     2"));
        assert!(text.contains("total contribution 1.0000"));
    }

    #[test]
    fn comparison_lists_shared_nodes() {
        let text = format_comparison(&[
            result(Strategy::Efi, &[1, 2, 3]),
            result(Strategy::Genetic(Method::Efi), &[3, 1, 9]),
        ]);
        assert!(text.contains("Common to all: [1, 3]"), "{text}");
        assert!(text.contains("GA-EFI"));
    }
}
