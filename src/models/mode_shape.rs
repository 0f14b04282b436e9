//! Normalised mode-shape matrix plus the node table it is sampled on.
//!
//! Rows are candidate DOFs (one per node), columns are vibration modes in
//! ascending mode order. Each column is scaled so its largest absolute entry
//! is exactly `1.0`, which makes modes with very different raw amplitudes
//! comparable.

use nalgebra::DMatrix;

use crate::domain::NodeTable;
use crate::error::SensorError;

#[derive(Debug, Clone)]
pub struct ModeShapeModel {
    nodes: NodeTable,
    matrix: DMatrix<f64>,
}

impl ModeShapeModel {
    /// Normalise `raw_modes` (one displacement column per mode) against `nodes`.
    ///
    /// Fails if the column count differs from `declared_modes`, a column length
    /// differs from the node count, a value is non-finite, or a column is all
    /// zeros. The input is not modified.
    pub fn build(
        nodes: NodeTable,
        raw_modes: &[Vec<f64>],
        declared_modes: usize,
    ) -> Result<Self, SensorError> {
        if declared_modes == 0 {
            return Err(SensorError::ShapeMismatch(
                "at least one mode is required".to_string(),
            ));
        }
        if raw_modes.len() != declared_modes {
            return Err(SensorError::ShapeMismatch(format!(
                "{} mode columns supplied, {declared_modes} declared",
                raw_modes.len()
            )));
        }

        let n = nodes.len();
        let mut matrix = DMatrix::<f64>::zeros(n, declared_modes);

        for (j, column) in raw_modes.iter().enumerate() {
            if column.len() != n {
                return Err(SensorError::ShapeMismatch(format!(
                    "mode {} has {} rows, node table has {n}",
                    j + 1,
                    column.len()
                )));
            }
            if let Some(row) = column.iter().position(|v| !v.is_finite()) {
                return Err(SensorError::NonFinite { mode: j + 1, row });
            }

            let scale = column.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            if scale == 0.0 {
                return Err(SensorError::DegenerateMode { mode: j + 1 });
            }
            for (i, v) in column.iter().enumerate() {
                matrix[(i, j)] = v / scale;
            }
        }

        Ok(Self { nodes, matrix })
    }

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    /// Normalised matrix, `n_dofs × n_modes`.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn n_dofs(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_modes(&self) -> usize {
        self.matrix.ncols()
    }

    /// Copy of the given rows, in the order given.
    ///
    /// # Panics
    /// Panics if an index is out of range.
    pub fn rows(&self, indices: &[usize]) -> DMatrix<f64> {
        self.matrix.select_rows(indices)
    }
}
