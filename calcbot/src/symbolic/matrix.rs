//! Dense square matrices: determinant and inverse

use super::BackendError;
use crate::format_number;

/// Pivots smaller than this are treated as zero
const SINGULAR_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    size: usize,
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    /// Build a square matrix, rejecting ragged or non-square input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, BackendError> {
        let size = rows.len();
        let columns = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != columns) {
            return Err(BackendError::RaggedMatrix);
        }
        if size == 0 || columns != size {
            return Err(BackendError::NotSquare {
                rows: size,
                columns,
            });
        }
        Ok(Self { size, rows })
    }

    /// Determinant by Gaussian elimination with partial pivoting
    pub fn determinant(&self) -> f64 {
        let mut a = self.rows.clone();
        let mut det = 1.0;

        for col in 0..self.size {
            let pivot = pivot_row(&a, col);
            if a[pivot][col].abs() < SINGULAR_EPSILON {
                return 0.0;
            }
            if pivot != col {
                a.swap(pivot, col);
                det = -det;
            }
            det *= a[col][col];
            for row in col + 1..self.size {
                let factor = a[row][col] / a[col][col];
                for k in col..self.size {
                    a[row][k] -= factor * a[col][k];
                }
            }
        }
        det
    }

    /// Inverse by Gauss-Jordan elimination on `[A | I]`
    pub fn inverse(&self) -> Result<Matrix, BackendError> {
        let n = self.size;
        let mut a = self.rows.clone();
        let mut inv: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();

        for col in 0..n {
            let pivot = pivot_row(&a, col);
            if a[pivot][col].abs() < SINGULAR_EPSILON {
                return Err(BackendError::SingularMatrix);
            }
            a.swap(pivot, col);
            inv.swap(pivot, col);

            let scale = a[col][col];
            for k in 0..n {
                a[col][k] /= scale;
                inv[col][k] /= scale;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..n {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        Ok(Matrix {
            size: n,
            rows: inv,
        })
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

fn pivot_row(a: &[Vec<f64>], col: usize) -> usize {
    (col..a.len())
        .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
        .unwrap_or(col)
}

/// Round away floating-point noise before display
pub fn clean(value: f64) -> f64 {
    let rounded = (value * 1e10).round() / 1e10;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|v| format_number(clean(*v))).collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        write!(f, "[{}]", rows.join(", "))
    }
}
