//! Driving-point residue (DPR).
//!
//! `DPR[i] = Σ_j Φ[i, j]² / f_j` weights each DOF's modal energy by the inverse
//! modal frequency, favouring locations that respond strongly to low modes.

use nalgebra::DMatrix;

use crate::error::SensorError;

/// Check a frequency sequence against the mode count.
pub fn validate_frequencies(frequencies: &[f64], modes: usize) -> Result<(), SensorError> {
    if frequencies.len() != modes {
        return Err(SensorError::ShapeMismatch(format!(
            "{} modal frequencies supplied for {modes} modes",
            frequencies.len()
        )));
    }
    if let Some((mode, &value)) = frequencies
        .iter()
        .enumerate()
        .find(|(_, f)| !(f.is_finite() && **f > 0.0))
    {
        return Err(SensorError::InvalidFrequency {
            mode: mode + 1,
            value,
        });
    }
    Ok(())
}

/// DPR for every row of `phi`.
///
/// # Panics
/// Panics if `frequencies.len() < phi.ncols()`. Callers validate with
/// [`validate_frequencies`] first.
pub fn driving_point_residue(phi: &DMatrix<f64>, frequencies: &[f64]) -> Vec<f64> {
    phi.row_iter()
        .map(|row| {
            row.iter()
                .zip(frequencies)
                .map(|(v, f)| v * v / f)
                .sum()
        })
        .collect()
}

/// Divide by the maximum so the largest entry becomes 1.
pub fn normalize_by_max(values: &[f64], metric: &'static str) -> Result<Vec<f64>, SensorError> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(max.is_finite() && max > 0.0) {
        return Err(SensorError::DegenerateMetric { metric });
    }
    Ok(values.iter().map(|v| v / max).collect())
}
