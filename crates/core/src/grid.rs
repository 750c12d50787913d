//! Fixed lattice of normalized sample coordinates.
//!
//! A [`Grid`] of size `n` holds `n * n` points spanning [-1, 1] on both axes,
//! stored in row-major order with the outer loop over `x`. The order is part
//! of the contract: renderers key elements positionally across frames.

use crate::error::StudioError;
use glam::DVec2;
use serde::Serialize;

/// Largest accepted points per axis.
pub const MAX_GRID_SIZE: usize = 4096;

/// One normalized sample coordinate of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
    pub index: usize,
}

impl GridPoint {
    /// The point as a vector, for distance computations.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Immutable `n x n` lattice of [`GridPoint`]s, generated once.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    points: Vec<GridPoint>,
}

impl Grid {
    /// Generates the lattice for `size` points per axis.
    ///
    /// Returns `StudioError::InvalidGridSize` unless `2 <= size <=`
    /// [`MAX_GRID_SIZE`]. The spacing divides by `size - 1`.
    pub fn new(size: usize) -> Result<Self, StudioError> {
        if !(2..=MAX_GRID_SIZE).contains(&size) {
            return Err(StudioError::InvalidGridSize(size));
        }
        let len = size * size;

        let step = (size - 1) as f64;
        let mut points = Vec::with_capacity(len);
        for i in 0..size {
            for j in 0..size {
                points.push(GridPoint {
                    x: (i as f64 / step) * 2.0 - 1.0,
                    y: (j as f64 / step) * 2.0 - 1.0,
                    index: i * size + j,
                });
            }
        }

        tracing::debug!(size, points = len, "generated grid");
        Ok(Self { size, points })
    }

    /// Points per axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of points (`size * size`).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a valid grid has at least four points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in row-major order.
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// The point at column `i` (x axis) and row `j` (y axis), if in range.
    pub fn get(&self, i: usize, j: usize) -> Option<&GridPoint> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.points.get(i * self.size + j)
    }
}
