//! Scalar field values on a regular lattice

use super::error::{HeatmapError, Result};
use ndarray::Array2;

/// A `rows × cols` grid of samples in row-major order
///
/// Row `i` holds the samples at vertical coordinate `t[i]`; column `j` the
/// samples at horizontal coordinate `x[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    values: Array2<f64>,
}

impl Grid {
    /// Reshape a flat sample buffer into `rows × cols`
    ///
    /// The first `cols` samples form row 0, the next `cols` row 1, and so on.
    pub fn from_samples(samples: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            HeatmapError::Shape(format!("grid shape {}×{} overflows", rows, cols))
        })?;

        if samples.len() != expected {
            return Err(HeatmapError::Shape(format!(
                "{} samples cannot be reshaped into {}×{} (expected {})",
                samples.len(),
                rows,
                cols,
                expected
            )));
        }

        let values = Array2::from_shape_vec((rows, cols), samples)
            .map_err(|e| HeatmapError::Shape(e.to_string()))?;

        Ok(Grid { values })
    }

    /// Build a grid from a function of (row, col)
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        Grid {
            values: Array2::from_shape_fn((rows, cols), |(i, j)| f(i, j)),
        }
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Flatten back to row-major order
    pub fn to_flat(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Minimum and maximum over finite cells, None if there are none
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Number of NaN cells
    pub fn count_nan(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// Number of +/- infinite cells
    pub fn count_infinite(&self) -> usize {
        self.values.iter().filter(|v| v.is_infinite()).count()
    }
}
