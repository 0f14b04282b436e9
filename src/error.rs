//! Error type shared by the optimisation engines and the `spo` front-end.
//!
//! Engines raise errors at the point of detection and never recover
//! internally. The binary maps each kind to a process exit code:
//!
//! - `2`: invalid configuration or arguments
//! - `3`: not enough DOFs for the requested sensor count
//! - `4`: numerical/degenerate input
//! - `5`: export I/O

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    /// Dimensions disagree between node table, mode matrix and frequencies.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A mode column is identically zero and cannot be normalised.
    #[error("mode {mode} is degenerate: every displacement is zero")]
    DegenerateMode { mode: usize },

    /// A normalisation denominator of a derived metric is zero.
    #[error("degenerate metric: maximum {metric} is zero")]
    DegenerateMetric { metric: &'static str },

    #[error(
        "insufficient data: cannot select {target} sensors from {n_dofs} DOFs \
         (target must be at least 1 and below {n_dofs})"
    )]
    InsufficientData { target: usize, n_dofs: usize },

    #[error("raw mode data contains a non-finite value at mode {mode}, row {row}")]
    NonFinite { mode: usize, row: usize },

    #[error("modal frequency {value} for mode {mode} must be finite and > 0")]
    InvalidFrequency { mode: usize, value: f64 },

    #[error("the EFI-DPR objective requires modal frequencies")]
    MissingFrequencies,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("decomposition of a {rows}x{cols} mode matrix failed to converge")]
    Decomposition { rows: usize, cols: usize },

    #[error("{0}")]
    Io(String),
}

impl SensorError {
    pub fn exit_code(&self) -> u8 {
        match self {
            SensorError::InvalidConfig(_)
            | SensorError::MissingFrequencies
            | SensorError::ShapeMismatch(_)
            | SensorError::InvalidFrequency { .. } => 2,
            SensorError::InsufficientData { .. } => 3,
            SensorError::DegenerateMode { .. }
            | SensorError::DegenerateMetric { .. }
            | SensorError::NonFinite { .. }
            | SensorError::Decomposition { .. } => 4,
            SensorError::Io(_) => 5,
        }
    }

    /// Guard shared by every engine: `target` must leave at least one DOF
    /// selected and at least one discarded.
    pub fn check_target(target: usize, n_dofs: usize) -> Result<(), SensorError> {
        if target == 0 || target >= n_dofs {
            return Err(SensorError::InsufficientData { target, n_dofs });
        }
        Ok(())
    }
}
