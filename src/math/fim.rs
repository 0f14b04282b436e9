//! Fisher information of a set of measurement rows.
//!
//! For a mode matrix `Φ` restricted to the rows under consideration, the
//! Fisher information matrix is `FIM = Φ Φᵀ` (rows × rows). Its eigenstructure
//! tells how well those rows can estimate the modal coordinates.
//!
//! Numerical notes:
//! - `Φ Φᵀ` has rank at most `M` (the mode count). Its non-null eigenpairs are
//!   exactly `(σ², u)` for the singular values `σ` and left singular vectors `u`
//!   of `Φ`, so we take the thin SVD of `Φ` instead of forming and diagonalising
//!   an `n × n` matrix. This keeps each pass `O(n M²)` instead of `O(n³)`.
//! - Eigenvalues at or below `EIGENVALUE_FLOOR` are treated as null. Summing
//!   squared components over *all* `n` eigenvectors of `Φ Φᵀ` would give `1`
//!   for every row (they form an orthogonal basis), so only the dominant
//!   eigenvectors carry the effective-independence signal.

use nalgebra::DMatrix;

use crate::error::SensorError;

/// Eigenvalues at or below this are numerically zero (rank-deficient subsets).
pub const EIGENVALUE_FLOOR: f64 = 1e-10;

/// Non-null eigen-decomposition of `Φ Φᵀ`.
#[derive(Debug, Clone)]
pub struct FisherInformation {
    /// Ascending.
    eigenvalues: Vec<f64>,
    /// `rows × eigenvalues.len()`, column `j` pairs with `eigenvalues[j]`.
    eigenvectors: DMatrix<f64>,
}

impl FisherInformation {
    /// Decompose the FIM of `phi` (rows = DOFs, columns = modes).
    pub fn decompose(phi: &DMatrix<f64>) -> Result<Self, SensorError> {
        let (rows, cols) = phi.shape();
        let svd = phi
            .clone()
            .try_svd(true, false, f64::EPSILON, 0)
            .ok_or(SensorError::Decomposition { rows, cols })?;
        let u = svd.u.ok_or(SensorError::Decomposition { rows, cols })?;

        let mut pairs: Vec<(f64, usize)> = svd
            .singular_values
            .iter()
            .enumerate()
            .map(|(j, s)| (s * s, j))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let eigenvectors = DMatrix::from_fn(rows, pairs.len(), |i, c| u[(i, pairs[c].1)]);
        let eigenvalues = pairs.into_iter().map(|(lambda, _)| lambda).collect();

        Ok(Self {
            eigenvalues,
            eigenvectors,
        })
    }

    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    pub fn eigenvectors(&self) -> &DMatrix<f64> {
        &self.eigenvectors
    }

    /// Effective independence `Ed[i] = Σ_j v[i, j]²` over the dominant eigenvectors.
    ///
    /// `Ed` is the diagonal of the projector onto the column space of `Φ`, so
    /// each entry lies in `[0, 1]` and the entries sum to the rank.
    pub fn effective_independence(&self) -> Vec<f64> {
        let dominant: Vec<usize> = self
            .eigenvalues
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGENVALUE_FLOOR)
            .map(|(j, _)| j)
            .collect();

        (0..self.eigenvectors.nrows())
            .map(|i| {
                dominant
                    .iter()
                    .map(|&j| self.eigenvectors[(i, j)].powi(2))
                    .sum()
            })
            .collect()
    }
}

/// `Σ ln λ` over the FIM eigenvalues above `EIGENVALUE_FLOOR`.
///
/// A log-determinant proxy: rank-deficient subsets are penalised by losing
/// terms rather than by returning `-∞`.
pub fn log_information(phi: &DMatrix<f64>) -> Result<f64, SensorError> {
    let (rows, cols) = phi.shape();
    let svd = phi
        .clone()
        .try_svd(false, false, f64::EPSILON, 0)
        .ok_or(SensorError::Decomposition { rows, cols })?;

    Ok(svd
        .singular_values
        .iter()
        .map(|s| s * s)
        .filter(|lambda| *lambda > EIGENVALUE_FLOOR)
        .map(f64::ln)
        .sum())
}
