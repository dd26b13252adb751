//! Cell-centered structured grid with ghost cells on every side.

use std::ops::Range;

use crate::config::GridConfig;

use super::search::NearestSearch;

/// Ghost cells added on each side of every axis.
pub const GHOST_CELLS: usize = 1;

/// Structured grid metadata consumed by the turbine model.
///
/// Coordinate vectors span the full padded extent (ghost cells included);
/// `istart..iend`, `jstart..jend` and `kstart..kend` select the interior.
/// Arrays on this grid are flattened as `i + j * jstride + k * kstride`.
///
/// # Examples
///
/// ```
/// use windfarm_sim::config::GridConfig;
/// use windfarm_sim::flow::Grid;
///
/// let grid = Grid::from_config(&GridConfig::default());
/// assert_eq!(grid.dx, 25.0);
/// assert_eq!(grid.index(grid.istart, grid.jstart, grid.kstart), 1 + grid.jstride + grid.kstride);
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    pub itot: usize,
    pub jtot: usize,
    pub ktot: usize,
    pub icells: usize,
    pub jcells: usize,
    pub kcells: usize,
    pub istart: usize,
    pub iend: usize,
    pub jstart: usize,
    pub jend: usize,
    pub kstart: usize,
    pub kend: usize,
    pub jstride: usize,
    pub kstride: usize,
    /// Horizontal spacing in x (m).
    pub dx: f64,
    /// Horizontal spacing in y (m).
    pub dy: f64,
    /// Domain extent in x (m).
    pub xsize: f64,
    /// Domain extent in y (m).
    pub ysize: f64,
    /// Domain extent in z (m).
    pub zsize: f64,
    /// Cell-center x coordinates, padded.
    pub x: Vec<f64>,
    /// Cell-center y coordinates, padded.
    pub y: Vec<f64>,
    /// Cell-center heights, padded.
    pub z: Vec<f64>,
    /// Nearest-coordinate strategy for hub and upstream lookups.
    pub search: NearestSearch,
}

impl Grid {
    /// Builds a grid from a validated [`GridConfig`].
    ///
    /// Horizontal axes are always uniform. The vertical axis is uniform unless
    /// explicit levels are configured, in which case ghost levels mirror the
    /// first and last interior spacing.
    ///
    /// # Panics
    ///
    /// Panics if any cell count is zero or explicit levels do not match `ktot`.
    pub fn from_config(cfg: &GridConfig) -> Self {
        assert!(cfg.itot > 0 && cfg.jtot > 0 && cfg.ktot > 0);

        let gc = GHOST_CELLS;
        let icells = cfg.itot + 2 * gc;
        let jcells = cfg.jtot + 2 * gc;
        let kcells = cfg.ktot + 2 * gc;

        let dx = cfg.xsize / cfg.itot as f64;
        let dy = cfg.ysize / cfg.jtot as f64;

        let z = match &cfg.z {
            Some(levels) => {
                assert_eq!(levels.len(), cfg.ktot, "explicit z levels must match ktot");
                padded_levels(levels)
            }
            None => uniform_centers(kcells, cfg.zsize / cfg.ktot as f64),
        };

        Self {
            itot: cfg.itot,
            jtot: cfg.jtot,
            ktot: cfg.ktot,
            icells,
            jcells,
            kcells,
            istart: gc,
            iend: gc + cfg.itot,
            jstart: gc,
            jend: gc + cfg.jtot,
            kstart: gc,
            kend: gc + cfg.ktot,
            jstride: icells,
            kstride: icells * jcells,
            dx,
            dy,
            xsize: cfg.xsize,
            ysize: cfg.ysize,
            zsize: cfg.zsize,
            x: uniform_centers(icells, dx),
            y: uniform_centers(jcells, dy),
            z,
            search: NearestSearch::from_name(&cfg.search).unwrap_or_default(),
        }
    }

    /// Total number of cells in a flattened 3-D array, ghost cells included.
    pub fn ncells(&self) -> usize {
        self.icells * self.jcells * self.kcells
    }

    /// Flattened index of cell `(i, j, k)`.
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * self.jstride + k * self.kstride
    }

    /// Interior range along x.
    pub fn interior_i(&self) -> Range<usize> {
        self.istart..self.iend
    }

    /// Interior range along y.
    pub fn interior_j(&self) -> Range<usize> {
        self.jstart..self.jend
    }

    /// Interior range along z.
    pub fn interior_k(&self) -> Range<usize> {
        self.kstart..self.kend
    }

    /// Interior x-index nearest to `x`.
    pub fn nearest_i(&self, x: f64) -> usize {
        self.search.nearest(&self.x, x, self.interior_i())
    }

    /// Interior y-index nearest to `y`.
    pub fn nearest_j(&self, y: f64) -> usize {
        self.search.nearest(&self.y, y, self.interior_j())
    }

    /// Interior vertical index whose height is nearest to `height`.
    pub fn nearest_k(&self, height: f64) -> usize {
        self.search.nearest(&self.z, height, self.interior_k())
    }
}

/// Cell centers for `n` padded cells of width `delta`; the first interior
/// cell is centered at `delta / 2`.
fn uniform_centers(n: usize, delta: f64) -> Vec<f64> {
    (0..n)
        .map(|i| (i as f64 - GHOST_CELLS as f64 + 0.5) * delta)
        .collect()
}

fn padded_levels(levels: &[f64]) -> Vec<f64> {
    let n = levels.len();
    let (bottom_gap, top_gap) = if n > 1 {
        (levels[1] - levels[0], levels[n - 1] - levels[n - 2])
    } else {
        (levels[0], levels[0])
    };

    let mut z = Vec::with_capacity(n + 2 * GHOST_CELLS);
    for g in (1..=GHOST_CELLS).rev() {
        z.push(levels[0] - g as f64 * bottom_gap);
    }
    z.extend_from_slice(levels);
    for g in 1..=GHOST_CELLS {
        z.push(levels[n - 1] + g as f64 * top_gap);
    }
    z
}
