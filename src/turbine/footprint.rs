use crate::flow::Grid;

/// Gaussian filter width as a multiple of the horizontal grid spacing.
///
/// The width is taken from `dx` alone, so on grids where `dx != dy` the
/// filter is only approximately isotropic.
pub const FILTER_WIDTH_FACTOR: f64 = 1.5;

/// One grid cell covered by a rotor disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskCell {
    /// Flattened 3-D index into the flow field.
    pub index: usize,
    /// Normalized Gaussian weight.
    pub weight: f64,
}

/// Weighted set of grid cells approximating a rotor disk at hub height.
///
/// Weights sum to one whenever the footprint is non-empty. A footprint is
/// built once and never modified; the grid is assumed static.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Footprint {
    cells: Vec<DiskCell>,
}

impl Footprint {
    /// Discretizes a disk of `radius` centered at `(x, y)` on vertical level `k`.
    ///
    /// Every interior cell whose center lies within `radius` of the disk
    /// center is included with weight `exp(-6 r² / Δ²)`, `Δ` being
    /// [`FILTER_WIDTH_FACTOR`] times `dx`. Weights are then normalized. When no
    /// cell center falls inside the disk the footprint is empty.
    pub fn build(grid: &Grid, x: f64, y: f64, radius: f64, k: usize) -> Self {
        let delta = FILTER_WIDTH_FACTOR * grid.dx;
        let delta2 = delta * delta;

        let mut cells = Vec::new();
        for j in grid.interior_j() {
            for i in grid.interior_i() {
                let dx = grid.x[i] - x;
                let dy = grid.y[j] - y;
                let r2 = dx * dx + dy * dy;
                if r2.sqrt() <= radius {
                    cells.push(DiskCell {
                        index: grid.index(i, j, k),
                        weight: (-6.0 * r2 / delta2).exp(),
                    });
                }
            }
        }

        let sum: f64 = cells.iter().map(|c| c.weight).sum();
        if sum > 0.0 {
            for cell in &mut cells {
                cell.weight /= sum;
            }
        }

        Self { cells }
    }

    pub fn cells(&self) -> &[DiskCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sum of all weights: one for a non-empty footprint, zero otherwise.
    pub fn weight_sum(&self) -> f64 {
        self.cells.iter().map(|c| c.weight).sum()
    }

    /// Weighted average of the velocity projected onto direction `yaw`.
    pub fn projected_average(&self, u: &[f64], v: &[f64], yaw: f64) -> f64 {
        let (sin, cos) = yaw.sin_cos();
        self.cells
            .iter()
            .map(|c| c.weight * (u[c.index] * cos + v[c.index] * sin))
            .sum()
    }

    /// Subtracts `force`, distributed by weight and decomposed along `yaw`,
    /// from the covered cells.
    pub fn apply_force(&self, u: &mut [f64], v: &mut [f64], force: f64, yaw: f64) {
        let (sin, cos) = yaw.sin_cos();
        for c in &self.cells {
            let f = force * c.weight;
            u[c.index] -= f * cos;
            v[c.index] -= f * sin;
        }
    }
}
