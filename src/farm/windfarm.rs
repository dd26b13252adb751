//! Farm coordinator owning the turbines and sequencing their forcing.

use log::{info, warn};

use crate::accel::{AccelerationBackend, HostOnly};
use crate::config::{FarmConfig, TurbineConfig};
use crate::flow::{FlowField, Grid};
use crate::stats::StatsSink;
use crate::turbine::Turbine;

use super::error::FarmError;
use super::layout::{self, Placement};

/// A wind farm: an ordered set of turbines sharing one rotor configuration.
///
/// Turbines run in creation order, and that order is also the order in which
/// their power is summed. Within one [`Windfarm::exec`] call the farm holds
/// the only mutable borrow of the flow field and hands it to one turbine at a
/// time. Footprints are assumed not to overlap, so the order does not change
/// the result. Running turbines concurrently would need conflict-free batches
/// of footprints or per-cell atomic accumulation.
///
/// Generic over `B: AccelerationBackend` for static dispatch; the default
/// [`HostOnly`] backend does nothing.
#[derive(Debug)]
pub struct Windfarm<B: AccelerationBackend = HostOnly> {
    farm: FarmConfig,
    turbine: TurbineConfig,
    turbines: Vec<Turbine>,
    farm_power: f64,
    backend: B,
}

impl Windfarm<HostOnly> {
    /// Creates an empty farm on the host-only backend.
    pub fn new(turbine: &TurbineConfig, farm: &FarmConfig) -> Self {
        Self::with_backend(turbine, farm, HostOnly)
    }
}

impl<B: AccelerationBackend> Windfarm<B> {
    /// Creates an empty farm that mirrors turbine state on `backend`.
    ///
    /// No turbines exist until [`Windfarm::create`] is called.
    pub fn with_backend(turbine: &TurbineConfig, farm: &FarmConfig, backend: B) -> Self {
        Self {
            farm: farm.clone(),
            turbine: turbine.clone(),
            turbines: Vec::new(),
            farm_power: 0.0,
            backend,
        }
    }

    /// Builds the farm layout on `grid`, replacing any existing turbines.
    ///
    /// Positions come from the layout file when one is configured, otherwise
    /// from the regular row/column pattern. Each candidate is checked for
    /// horizontal clearance, then constructed and discretized before the next
    /// candidate is looked at.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::LayoutUnreadable`] or [`FarmError::MalformedLayout`]
    /// for layout file problems, and [`FarmError::BoundaryViolation`] for the
    /// first candidate whose disk crosses a domain edge. Turbines accepted
    /// before a boundary violation stay in the farm.
    pub fn create(&mut self, grid: &Grid) -> Result<(), FarmError> {
        self.turbines.clear();

        let (placements, source) = match self.farm.layout_path() {
            Some(path) => (
                layout::read_layout_file(path)?,
                format!("layout file \"{}\"", path.display()),
            ),
            None => (
                layout::procedural(&self.farm, self.turbine.diameter),
                format!("{} x {} pattern", self.farm.rows, self.farm.cols),
            ),
        };

        for placement in placements {
            if let Err(e) = self.add_turbine(grid, placement) {
                if !self.turbines.is_empty() {
                    warn!(
                        "farm creation failed after {} turbine(s) were placed; they remain in the farm",
                        self.turbines.len()
                    );
                }
                return Err(e);
            }
        }

        info!(
            "created {} turbine(s) from {source} (D={} m, backend={})",
            self.turbines.len(),
            self.turbine.diameter,
            self.backend.name()
        );
        Ok(())
    }

    fn add_turbine(&mut self, grid: &Grid, p: Placement) -> Result<(), FarmError> {
        check_clearance(grid, &p, self.turbine.diameter)?;

        let mut turbine = Turbine::new(
            self.turbines.len(),
            &self.turbine,
            p.x,
            p.y,
            p.hub_override,
        );
        turbine.create(grid);
        self.turbines.push(turbine);
        Ok(())
    }

    /// Runs every turbine at `time` and sums their power.
    pub fn exec(
        &mut self,
        time: f64,
        grid: &Grid,
        field: &mut FlowField,
        stats: &mut impl StatsSink,
    ) {
        self.farm_power = 0.0;
        for turbine in &mut self.turbines {
            turbine.exec(time, grid, field, stats);
            self.farm_power += turbine.power();
        }
    }

    /// Aggregate power from the most recent [`Windfarm::exec`] call.
    pub fn farm_power(&self) -> f64 {
        self.farm_power
    }

    /// Turbines in execution order.
    pub fn turbines(&self) -> &[Turbine] {
        &self.turbines
    }

    pub fn len(&self) -> usize {
        self.turbines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turbines.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mirrors every turbine on the backend. Call once before stepping.
    pub fn prepare_device(&mut self) {
        for turbine in &self.turbines {
            turbine.prepare_device(&mut self.backend);
        }
    }

    /// Releases every turbine on the backend. Call once after stepping.
    pub fn clear_device(&mut self) {
        for turbine in &self.turbines {
            turbine.clear_device(&mut self.backend);
        }
    }
}

/// Rejects a placement whose disk would leave `[0, xsize] x [0, ysize]`.
///
/// Written as a negated containment test so a NaN position or diameter is
/// rejected too.
fn check_clearance(grid: &Grid, p: &Placement, diameter: f64) -> Result<(), FarmError> {
    let half = 0.5 * diameter;
    let inside = half >= 0.0
        && p.x - half >= 0.0
        && p.x + half <= grid.xsize
        && p.y - half >= 0.0
        && p.y + half <= grid.ysize;
    if !inside {
        return Err(FarmError::BoundaryViolation {
            x: p.x,
            y: p.y,
            diameter,
            xsize: grid.xsize,
            ysize: grid.ysize,
        });
    }
    Ok(())
}
