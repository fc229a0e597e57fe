//! Coordinate axes and the 2D coordinate mesh built from them

use ndarray::{Array1, Array2, Axis};

/// `n` evenly spaced samples over the closed interval `[lo, hi]`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAxis {
    values: Array1<f64>,
}

impl LinearAxis {
    /// Evenly spaced samples, both endpoints included
    ///
    /// `axis[k] = lo + k * (hi - lo) / (n - 1)`. Both ends are pinned to
    /// `lo` and `hi` so the endpoints are exact even when the step is not
    /// representable. `n == 1` gives `[lo]`; `n == 0` gives an empty axis.
    pub fn linspace(lo: f64, hi: f64, n: usize) -> Self {
        let values = match n {
            0 => Array1::zeros(0),
            1 => Array1::from_elem(1, lo),
            _ => {
                let step = (hi - lo) / (n - 1) as f64;
                Array1::from_shape_fn(n, |k| match k {
                    0 => lo,
                    k if k == n - 1 => hi,
                    k => lo + k as f64 * step,
                })
            }
        };
        LinearAxis { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// True when every sample and every cell edge is a finite number
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
            && self.cell_edges().iter().all(|e| e.is_finite())
    }

    /// Cell boundaries around each sample
    ///
    /// Returns `n + 1` edges: midpoints between neighbouring samples, with the
    /// outer edges half a step beyond the first and last sample. A single
    /// sample gets a unit-wide cell.
    pub fn cell_edges(&self) -> Vec<f64> {
        let v = &self.values;
        match v.len() {
            0 => Vec::new(),
            1 => vec![v[0] - 0.5, v[0] + 0.5],
            n => {
                let mut edges = Vec::with_capacity(n + 1);
                edges.push(v[0] - (v[1] - v[0]) / 2.0);
                for k in 0..n - 1 {
                    edges.push((v[k] + v[k + 1]) / 2.0);
                }
                edges.push(v[n - 1] + (v[n - 1] - v[n - 2]) / 2.0);
                edges
            }
        }
    }
}

/// Rectangle covered by one grid cell, in plot coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellQuad {
    pub x0: f64,
    pub x1: f64,
    pub t0: f64,
    pub t1: f64,
}

/// Per-cell plotting coordinates
///
/// `x[[i, j]]` is the horizontal axis at `j` for every row `i`; `t[[i, j]]`
/// is the vertical axis at `i` for every column `j`.
#[derive(Debug, Clone)]
pub struct CoordinateMesh {
    pub x: Array2<f64>,
    pub t: Array2<f64>,
    x_edges: Vec<f64>,
    t_edges: Vec<f64>,
}

impl CoordinateMesh {
    /// Broadcast the horizontal axis down the rows and the vertical axis
    /// across the columns
    pub fn from_axes(x_axis: &LinearAxis, t_axis: &LinearAxis) -> Self {
        let shape = (t_axis.len(), x_axis.len());

        let x = x_axis
            .values()
            .broadcast(shape)
            .map(|view| view.to_owned())
            .unwrap_or_else(|| Array2::zeros(shape));
        let t = t_axis
            .values()
            .view()
            .insert_axis(Axis(1))
            .broadcast(shape)
            .map(|view| view.to_owned())
            .unwrap_or_else(|| Array2::zeros(shape));

        CoordinateMesh {
            x,
            t,
            x_edges: x_axis.cell_edges(),
            t_edges: t_axis.cell_edges(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// Quad for cell `(row, col)`, centered on `(x[[row, col]], t[[row, col]])`
    pub fn cell(&self, row: usize, col: usize) -> CellQuad {
        CellQuad {
            x0: self.x_edges[col],
            x1: self.x_edges[col + 1],
            t0: self.t_edges[row],
            t1: self.t_edges[row + 1],
        }
    }

    /// True when every quad has finite corners
    pub fn is_finite(&self) -> bool {
        self.x_edges.iter().chain(&self.t_edges).all(|e| e.is_finite())
    }

    /// Full extent covered by all quads: ((x_min, x_max), (t_min, t_max))
    pub fn extent(&self) -> ((f64, f64), (f64, f64)) {
        let span = |edges: &[f64]| match (edges.first(), edges.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0.0, 1.0),
        };
        (span(&self.x_edges), span(&self.t_edges))
    }
}
