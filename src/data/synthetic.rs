//! Synthetic simply supported rectangular plate.
//!
//! Mode `(m, n)` of a simply supported plate of size `a × b` has the shape
//!
//! ```text
//! w(x, y) = sin(m π x / a) · sin(n π y / b)
//! ```
//!
//! and a natural frequency proportional to `(m/a)² + (n/b)²`. We sample the
//! shapes on an interior `nx × ny` grid (the supported edges carry no motion),
//! keep the lowest `modes` modes and scale frequencies so the fundamental sits
//! at `FUNDAMENTAL_HZ`.

use std::f64::consts::PI;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::{NodeTable, PlateSpec};
use crate::error::SensorError;

/// Fundamental frequency of the generated plate (Hz).
pub const FUNDAMENTAL_HZ: f64 = 1.4407;

/// Node table, raw (unnormalised) mode columns and modal frequencies.
#[derive(Debug, Clone)]
pub struct SyntheticStructure {
    pub nodes: NodeTable,
    pub raw_modes: Vec<Vec<f64>>,
    pub frequencies: Vec<f64>,
}

pub fn generate_plate(spec: &PlateSpec) -> Result<SyntheticStructure, SensorError> {
    if !(spec.length.is_finite() && spec.width.is_finite() && spec.length > 0.0 && spec.width > 0.0)
    {
        return Err(SensorError::InvalidConfig(
            "plate dimensions must be finite and > 0".to_string(),
        ));
    }
    if spec.nx < 2 || spec.ny < 2 {
        return Err(SensorError::InvalidConfig(
            "plate grid needs at least 2 points per direction".to_string(),
        ));
    }
    if spec.modes == 0 || spec.modes > spec.nx * spec.ny {
        return Err(SensorError::InvalidConfig(format!(
            "mode count must be in 1..={} for a {}x{} grid",
            spec.nx * spec.ny,
            spec.nx,
            spec.ny
        )));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(SensorError::InvalidConfig(
            "noise level must be finite and >= 0".to_string(),
        ));
    }

    let xs: Vec<f64> = interior_grid(spec.length, spec.nx);
    let ys: Vec<f64> = interior_grid(spec.width, spec.ny);

    let positions: Vec<[f64; 3]> = ys
        .iter()
        .flat_map(|&y| xs.iter().map(move |&x| [x, y, 0.0]))
        .collect();
    let nodes = NodeTable::from_positions(&positions)?;

    let wavenumber = |m: usize, n: usize| {
        (m as f64 / spec.length).powi(2) + (n as f64 / spec.width).powi(2)
    };
    // Aliasing caps the resolvable half-waves at the grid size per direction.
    let mut pairs: Vec<(usize, usize)> = (1..=spec.nx)
        .flat_map(|m| (1..=spec.ny).map(move |n| (m, n)))
        .collect();
    pairs.sort_by(|a, b| {
        wavenumber(a.0, a.1)
            .partial_cmp(&wavenumber(b.0, b.1))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pairs.truncate(spec.modes);

    let base = wavenumber(1, 1);
    let frequencies: Vec<f64> = pairs
        .iter()
        .map(|&(m, n)| FUNDAMENTAL_HZ * wavenumber(m, n) / base)
        .collect();

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let noise = if spec.noise > 0.0 {
        Some(
            Normal::new(0.0, spec.noise)
                .map_err(|e| SensorError::InvalidConfig(format!("noise distribution error: {e}")))?,
        )
    } else {
        None
    };

    let raw_modes: Vec<Vec<f64>> = pairs
        .iter()
        .map(|&(m, n)| {
            positions
                .iter()
                .map(|p| {
                    let w = (m as f64 * PI * p[0] / spec.length).sin()
                        * (n as f64 * PI * p[1] / spec.width).sin();
                    match &noise {
                        Some(dist) => w + dist.sample(&mut rng),
                        None => w,
                    }
                })
                .collect()
        })
        .collect();

    Ok(SyntheticStructure {
        nodes,
        raw_modes,
        frequencies,
    })
}

/// `count` evenly spaced interior points of `[0, extent]`.
fn interior_grid(extent: f64, count: usize) -> Vec<f64> {
    let step = extent / (count + 1) as f64;
    (1..=count).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModeShapeModel;
    use approx::assert_abs_diff_eq;

    fn spec() -> PlateSpec {
        PlateSpec {
            length: 1200.0,
            width: 800.0,
            nx: 6,
            ny: 4,
            modes: 5,
            noise: 0.0,
            seed: 42,
        }
    }

    #[test]
    fn plate_shapes_and_frequencies() {
        let s = generate_plate(&spec()).unwrap();
        assert_eq!(s.nodes.len(), 24);
        assert_eq!(s.raw_modes.len(), 5);
        assert!(s.raw_modes.iter().all(|c| c.len() == 24));
        assert_abs_diff_eq!(s.frequencies[0], FUNDAMENTAL_HZ, epsilon = 1e-12);
        assert!(s.frequencies.windows(2).all(|w| w[0] <= w[1]));

        let model = ModeShapeModel::build(s.nodes, &s.raw_modes, 5).unwrap();
        assert_eq!(model.n_dofs(), 24);
    }

    #[test]
    fn noise_is_seeded() {
        let mut noisy = spec();
        noisy.noise = 0.05;
        let a = generate_plate(&noisy).unwrap();
        let b = generate_plate(&noisy).unwrap();
        assert_eq!(a.raw_modes, b.raw_modes);
        assert_ne!(a.raw_modes, generate_plate(&spec()).unwrap().raw_modes);
    }

    #[test]
    fn rejects_too_many_modes() {
        let mut bad = spec();
        bad.modes = 25;
        assert!(matches!(generate_plate(&bad), Err(SensorError::InvalidConfig(_))));
    }
}
