//! `PathMatrix` — a `paths × columns` grid of reals stored path-major.
//!
//! This is a thin newtype around `nalgebra::DMatrix<f64>`. nalgebra stores
//! matrices column-major, so the grid is kept transposed (one nalgebra column
//! per path): every path is a contiguous slice, which lets simulation stages
//! fill a preallocated buffer path by path and hand it over without copying.

use hw_core::{errors::Result, Real};
use nalgebra::DMatrix;

/// A dense grid indexed `[path][column]`.
///
/// Used for short-rate ensembles (`column` = time step), per-period discount
/// exponents and per-exercise swap values.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix(DMatrix<Real>);

impl PathMatrix {
    /// Create a zero-filled grid.
    pub fn zeros(paths: usize, columns: usize) -> Self {
        Self(DMatrix::zeros(columns, paths))
    }

    /// Create from a path-major buffer: `data[p * columns + c]` is the value
    /// of path `p` in column `c`.
    pub fn from_path_major(paths: usize, columns: usize, data: Vec<Real>) -> Result<Self> {
        hw_core::ensure!(columns > 0, "a path matrix needs at least one column");
        hw_core::ensure!(
            data.len() == paths * columns,
            "buffer holds {} values, expected {paths} paths × {columns} columns",
            data.len()
        );
        Ok(Self(DMatrix::from_vec(columns, paths, data)))
    }

    /// Create from one vector per path; all paths must have the same length.
    pub fn from_paths(rows: &[Vec<Real>]) -> Result<Self> {
        let paths = rows.len();
        let columns = rows.first().map_or(0, Vec::len);
        hw_core::ensure!(
            rows.iter().all(|r| r.len() == columns),
            "all paths must have {columns} columns"
        );
        let data: Vec<Real> = rows.iter().flatten().copied().collect();
        Self::from_path_major(paths, columns, data)
    }

    /// Number of paths.
    pub fn paths(&self) -> usize {
        self.0.ncols()
    }

    /// Number of columns per path.
    pub fn columns(&self) -> usize {
        self.0.nrows()
    }

    /// The values of path `i` as a contiguous slice.
    pub fn path(&self, i: usize) -> &[Real] {
        let c = self.columns();
        &self.0.as_slice()[i * c..(i + 1) * c]
    }

    /// Value of path `path` in column `column`.
    pub fn value(&self, path: usize, column: usize) -> Real {
        self.0[(column, path)]
    }

    /// Iterate over the paths in index order.
    pub fn iter_paths(&self) -> impl Iterator<Item = &[Real]> + '_ {
        let c = self.columns().max(1);
        self.0.as_slice().chunks(c)
    }

    /// Return `true` if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}
