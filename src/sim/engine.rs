//! Simulation engine that orchestrates inflow forcing and the wind farm.

use log::debug;

use crate::accel::{AccelerationBackend, HostOnly};
use crate::config::CaseConfig;
use crate::farm::{FarmError, Windfarm};
use crate::flow::{FlowField, Grid};
use crate::stats::{StatsSink, TurbineStats};
use crate::turbine::Turbine;

use super::clock::Clock;
use super::inflow::InflowForcing;
use super::types::StepResult;

/// Simulation engine owning the grid, flow field, farm, and stats sink.
///
/// Generic over `B: AccelerationBackend` and `S: StatsSink` for static
/// dispatch.
pub struct Engine<B: AccelerationBackend = HostOnly, S: StatsSink = TurbineStats> {
    config: CaseConfig,
    grid: Grid,
    field: FlowField,
    farm: Windfarm<B>,
    inflow: InflowForcing,
    stats: S,
}

impl Engine<HostOnly, TurbineStats> {
    /// Builds a host-only engine that collects turbine statistics in memory.
    ///
    /// # Errors
    ///
    /// Returns the [`FarmError`] raised while laying out the farm.
    pub fn from_case(config: &CaseConfig) -> Result<Self, FarmError> {
        Self::with_parts(config, HostOnly, TurbineStats::new())
    }
}

impl<B: AccelerationBackend, S: StatsSink> Engine<B, S> {
    /// Builds the engine from its parts and creates the farm.
    ///
    /// The flow field starts at the inflow velocity everywhere.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated case configuration
    /// * `backend` - Acceleration backend handed to the farm
    /// * `stats` - Sink receiving turbine samples
    ///
    /// # Errors
    ///
    /// Returns the [`FarmError`] raised while laying out the farm.
    pub fn with_parts(config: &CaseConfig, backend: B, stats: S) -> Result<Self, FarmError> {
        let grid = Grid::from_config(&config.grid);
        let inflow = InflowForcing::new(&config.inflow, config.simulation.seed);
        let (u0, v0) = inflow.velocity();
        let field = FlowField::uniform(&grid, u0, v0);

        let mut farm = Windfarm::with_backend(&config.turbine, &config.windfarm, backend);
        farm.create(&grid)?;

        Ok(Self {
            config: config.clone(),
            grid,
            field,
            farm,
            inflow,
            stats,
        })
    }

    /// Executes step `n` at time `n * dt` and returns its record.
    pub fn step(&mut self, n: usize) -> StepResult {
        let time = n as f64 * self.config.simulation.dt;
        self.advance(n, time)
    }

    fn advance(&mut self, n: usize, time: f64) -> StepResult {
        // 1. Host solver update
        self.inflow.apply(&mut self.field);

        // 2. Turbine forcing
        self.farm
            .exec(time, &self.grid, &mut self.field, &mut self.stats);

        // 3. Record
        let turbines = self.farm.turbines();
        let turbine_power: Vec<f64> = turbines.iter().map(Turbine::power).collect();
        let mean_disk_velocity = if turbines.is_empty() {
            0.0
        } else {
            turbines.iter().map(Turbine::disk_velocity).sum::<f64>() / turbines.len() as f64
        };

        StepResult {
            step: n,
            time,
            farm_power: self.farm.farm_power(),
            turbine_power,
            mean_disk_velocity,
        }
    }

    /// Executes all configured steps and returns the complete step record.
    ///
    /// The farm is mirrored on the backend before the first step and released
    /// after the last one.
    pub fn run(&mut self) -> Vec<StepResult> {
        let sim = &self.config.simulation;
        let mut clock = Clock::new(sim.steps, sim.dt);
        let mut results = Vec::with_capacity(sim.steps);

        self.farm.prepare_device();
        while let Some((n, time)) = clock.tick() {
            let result = self.advance(n, time);
            debug!("{result}");
            results.push(result);
        }
        self.farm.clear_device();

        results
    }

    pub fn config(&self) -> &CaseConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current flow field.
    pub fn field(&self) -> &FlowField {
        &self.field
    }

    pub fn farm(&self) -> &Windfarm<B> {
        &self.farm
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    /// Consumes the engine, returning its stats sink.
    pub fn into_stats(self) -> S {
        self.stats
    }
}
