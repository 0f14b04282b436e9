//! Export selection results to CSV/JSON.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts (plotting, FE post-processing).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use nalgebra::DMatrix;

use crate::domain::SelectionResult;
use crate::error::SensorError;

/// Write one row per sensor: `node,contribution,x_mm,y_mm,z_mm`.
pub fn write_results_csv(path: &Path, result: &SelectionResult) -> Result<(), SensorError> {
    let mut file = create(path, "results CSV")?;
    write_results(&mut file, result)
        .map_err(|e| SensorError::Io(format!("Failed to write results CSV: {e}")))
}

/// Write the whole `SelectionResult` as pretty JSON.
pub fn write_result_json(path: &Path, result: &SelectionResult) -> Result<(), SensorError> {
    let file = create(path, "result JSON")?;
    serde_json::to_writer_pretty(file, result)
        .map_err(|e| SensorError::Io(format!("Failed to write result JSON: {e}")))
}

/// Write the rows of a (reduced) mode-shape matrix, one mode per column.
pub fn write_mode_matrix_csv(path: &Path, matrix: &DMatrix<f64>) -> Result<(), SensorError> {
    let mut file = create(path, "mode matrix CSV")?;
    write_matrix(&mut file, matrix)
        .map_err(|e| SensorError::Io(format!("Failed to write mode matrix CSV: {e}")))
}

/// Insert a strategy suffix before the extension: `out.csv` -> `out_GA_EFI.csv`.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

fn create(path: &Path, what: &str) -> Result<BufWriter<File>, SensorError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| SensorError::Io(format!("Failed to create {what} '{}': {e}", path.display())))
}

fn write_results<W: Write>(out: &mut W, result: &SelectionResult) -> std::io::Result<()> {
    writeln!(out, "node,contribution,x_mm,y_mm,z_mm")?;
    for s in &result.sensors {
        writeln!(
            out,
            "{},{:.10},{:.4},{:.4},{:.4}",
            s.node_id, s.contribution, s.position[0], s.position[1], s.position[2]
        )?;
    }
    out.flush()
}

fn write_matrix<W: Write>(out: &mut W, matrix: &DMatrix<f64>) -> std::io::Result<()> {
    let header: Vec<String> = (1..=matrix.ncols()).map(|j| format!("mode_{j}")).collect();
    writeln!(out, "{}", header.join(","))?;
    for row in matrix.row_iter() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.10}")).collect();
        writeln!(out, "{}", cells.join(","))?;
    }
    out.flush()
}
