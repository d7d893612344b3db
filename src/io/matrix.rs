//! Distance matrix export for external embedding tools
//!
//! The CSV layout preserves caller ordering: one optional header row of
//! labels, then one row per image. A metric multidimensional-scaling
//! consumer only needs this plus the symmetry the matrix already carries.

use std::path::Path;

use ndarray::Array2;

use crate::io::error::{EvaluationError, Result};

/// Write a distance matrix as CSV, with an optional label header
///
/// An empty label slice omits the header entirely.
///
/// # Errors
///
/// Returns an error if:
/// - Labels are supplied but don't match the matrix row count
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn export_distance_matrix_csv(
    matrix: &Array2<f64>,
    labels: &[String],
    output_path: &Path,
) -> Result<()> {
    if !labels.is_empty() && labels.len() != matrix.nrows() {
        return Err(EvaluationError::ShapeMismatch {
            left: labels.len(),
            right: matrix.nrows(),
        });
    }

    let mut contents = String::new();
    if !labels.is_empty() {
        contents.push_str(&labels.join(","));
        contents.push('\n');
    }

    for row in matrix.outer_iter() {
        let line: Vec<String> = row.iter().map(ToString::to_string).collect();
        contents.push_str(&line.join(","));
        contents.push('\n');
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| EvaluationError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    std::fs::write(output_path, contents).map_err(|e| EvaluationError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write matrix",
        source: e,
    })
}
