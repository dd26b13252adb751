use super::grid::Grid;

/// Horizontal velocity components on a [`Grid`], flattened with the grid's
/// strides and mutated in place by turbine forcing.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowField {
    u: Vec<f64>,
    v: Vec<f64>,
}

impl FlowField {
    /// Names accepted by [`FlowField::component`].
    pub const COMPONENTS: &[&str] = &["u", "v"];

    /// Creates a field at rest.
    pub fn new(grid: &Grid) -> Self {
        Self::uniform(grid, 0.0, 0.0)
    }

    /// Creates a field with constant velocity `(u, v)` in every cell.
    pub fn uniform(grid: &Grid, u: f64, v: f64) -> Self {
        let n = grid.ncells();
        Self {
            u: vec![u; n],
            v: vec![v; n],
        }
    }

    /// Looks up a component array by name.
    pub fn component(&self, name: &str) -> Option<&[f64]> {
        match name {
            "u" => Some(&self.u),
            "v" => Some(&self.v),
            _ => None,
        }
    }

    pub fn u(&self) -> &[f64] {
        &self.u
    }

    pub fn v(&self) -> &[f64] {
        &self.v
    }

    /// Mutable access to both components at once.
    pub fn velocity_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.u, &mut self.v)
    }

    /// Number of cells per component.
    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }
}
