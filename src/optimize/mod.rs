//! Sensor-selection engines.
//!
//! Responsibilities:
//!
//! - iterative batch elimination by effective independence (`efi`)
//! - single-shot ranking by EFI × driving-point residue (`efi_dpr`)
//! - fixed-cardinality genetic search over either objective (`genetic`)
//!
//! The engines are independent strategies over a shared, read-only
//! `ModeShapeModel`. None keeps state between calls.

pub mod chromosome;
pub mod efi;
pub mod efi_dpr;
pub mod genetic;
pub mod operators;
pub mod progress;

pub use chromosome::*;
pub use efi::*;
pub use efi_dpr::*;
pub use genetic::*;
pub use operators::*;
pub use progress::*;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::NodeTable;
    use crate::models::ModeShapeModel;

    /// Two localised modes on ten DOFs: mode 1 lives at the start, mode 2 at the end.
    pub fn two_ended_model() -> ModeShapeModel {
        let positions: Vec<[f64; 3]> = (0..10).map(|i| [i as f64 * 50.0, 0.0, 0.0]).collect();
        let raw = vec![
            vec![1.0, 0.5, 0.2, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.1, 0.2, 0.5, 1.0],
        ];
        ModeShapeModel::build(NodeTable::from_positions(&positions).unwrap(), &raw, 2).unwrap()
    }

    /// Pinned-pinned beam bending modes sampled at `n` interior points.
    pub fn beam_model(n: usize, modes: usize) -> ModeShapeModel {
        let positions: Vec<[f64; 3]> = (0..n).map(|i| [(i + 1) as f64 * 10.0, 0.0, 0.0]).collect();
        let raw: Vec<Vec<f64>> = (1..=modes)
            .map(|m| {
                (0..n)
                    .map(|i| {
                        let x = (i + 1) as f64 / (n + 1) as f64;
                        (m as f64 * std::f64::consts::PI * x).sin()
                    })
                    .collect()
            })
            .collect();
        ModeShapeModel::build(NodeTable::from_positions(&positions).unwrap(), &raw, modes).unwrap()
    }

    /// Beam frequencies scale with the square of the mode number.
    pub fn beam_frequencies(modes: usize) -> Vec<f64> {
        (1..=modes).map(|m| 2.5 * (m * m) as f64).collect()
    }
}
