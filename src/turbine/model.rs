//! Actuator-disk turbine: footprint setup and per-step forcing.

use std::f64::consts::PI;

use log::{debug, trace, warn};

use crate::accel::AccelerationBackend;
use crate::config::TurbineConfig;
use crate::flow::{FlowField, Grid};
use crate::stats::{StatsSink, TurbineSample};

use super::footprint::Footprint;
use super::yaw::YawTracker;

/// A single actuator-disk turbine.
///
/// The turbine does not hold on to the grid or the flow field. The grid is
/// passed to [`Turbine::create`] and [`Turbine::exec`]; the flow field is
/// borrowed mutably for the duration of one `exec` call only, which makes the
/// caller the sole sequencer of writes to it.
///
/// # Power and thrust
///
/// With disk-averaged velocity `ū` along the yaw axis:
/// - thrust = `0.5 · ct · ū · |ū|` (reverses with the flow)
/// - power = `cp · 0.5 · ū³ · A`
///
/// Both are per unit air density.
#[derive(Debug, Clone)]
pub struct Turbine {
    id: usize,
    config: TurbineConfig,
    x: f64,
    y: f64,
    hub_height: f64,
    area: f64,
    yaw: YawTracker,
    next_stats: f64,
    k_hub: usize,
    footprint: Footprint,
    disk_velocity: f64,
    thrust: f64,
    power: f64,
}

impl Turbine {
    /// Creates a turbine at `(x, y)`.
    ///
    /// # Arguments
    ///
    /// * `id` - Position in the farm's execution order
    /// * `config` - Rotor and control parameters shared by the farm
    /// * `x`, `y` - Rotor center in the horizontal plane (m)
    /// * `hub_override` - Replaces the configured hub height when positive
    ///
    /// The footprint stays empty until [`Turbine::create`] is called.
    pub fn new(
        id: usize,
        config: &TurbineConfig,
        x: f64,
        y: f64,
        hub_override: Option<f64>,
    ) -> Self {
        let hub_height = hub_override
            .filter(|&h| h > 0.0)
            .unwrap_or(config.hub_height);

        Self {
            id,
            config: config.clone(),
            x,
            y,
            hub_height,
            area: PI * config.diameter * config.diameter * 0.25,
            yaw: YawTracker::new(config.start_time, config.yaw_period),
            next_stats: config.start_time,
            k_hub: 0,
            footprint: Footprint::default(),
            disk_velocity: 0.0,
            thrust: 0.0,
            power: 0.0,
        }
    }

    /// Locates the hub level and discretizes the rotor disk on `grid`.
    pub fn create(&mut self, grid: &Grid) {
        self.k_hub = grid.nearest_k(self.hub_height);
        self.footprint = Footprint::build(
            grid,
            self.x,
            self.y,
            0.5 * self.config.diameter,
            self.k_hub,
        );

        if self.footprint.is_empty() {
            warn!(
                "turbine {} at ({:.1}, {:.1}): no cell center inside the rotor disk, turbine will be inert",
                self.id, self.x, self.y
            );
        } else {
            debug!(
                "turbine {} at ({:.1}, {:.1}): hub level k={} (z={:.1} m), {} cells",
                self.id,
                self.x,
                self.y,
                self.k_hub,
                grid.z[self.k_hub],
                self.footprint.len()
            );
        }
    }

    /// Advances the turbine to `time` and forces `field` in place.
    ///
    /// Does nothing before the configured start time. Otherwise updates the
    /// yaw when due, computes thrust and power from the disk-averaged
    /// velocity, subtracts the thrust from the covered cells, and hands a
    /// sample to `stats` when statistics are due.
    pub fn exec(
        &mut self,
        time: f64,
        grid: &Grid,
        field: &mut FlowField,
        stats: &mut impl StatsSink,
    ) {
        if time < self.config.start_time {
            return;
        }

        let (u, v) = field.velocity_mut();

        if self.config.dynamic_yaw && self.yaw.is_due(time) {
            let (xref, yref) = self.yaw.upstream_of(self.x, self.y, self.config.diameter);
            let idx = grid.index(grid.nearest_i(xref), grid.nearest_j(yref), self.k_hub);
            let target = self.yaw.update(u[idx], v[idx]);
            trace!(
                "turbine {} t={time}: yaw target {:.4} rad, now {:.4} rad",
                self.id,
                target,
                self.yaw.angle()
            );
        }

        let yaw = self.yaw.angle();
        let umean = self.footprint.projected_average(u, v, yaw);

        self.disk_velocity = umean;
        self.thrust = 0.5 * self.config.thrust_coefficient * umean * umean.abs();
        self.power = self.config.power_coefficient * 0.5 * umean * umean * umean * self.area;

        self.footprint.apply_force(u, v, self.thrust, yaw);

        if self.config.stats_enabled && time >= self.next_stats {
            stats.record_turbine(self.sample(time));
            self.next_stats += self.config.stats_period;
        }
    }

    /// Mirrors this turbine's footprint on `backend`.
    pub fn prepare_device(&self, backend: &mut impl AccelerationBackend) {
        backend.upload(self.id, &self.footprint);
    }

    /// Releases this turbine's state on `backend`.
    pub fn clear_device(&self, backend: &mut impl AccelerationBackend) {
        backend.release(self.id);
    }

    fn sample(&self, time: f64) -> TurbineSample {
        TurbineSample {
            turbine: self.id,
            time,
            yaw: self.yaw.angle(),
            disk_velocity: self.disk_velocity,
            thrust: self.thrust,
            power: self.power,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Rotor center `(x, y)` in meters.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn hub_height(&self) -> f64 {
        self.hub_height
    }

    pub fn diameter(&self) -> f64 {
        self.config.diameter
    }

    /// Rotor disk area (m²).
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Vertical grid index of the hub (valid after [`Turbine::create`]).
    pub fn hub_index(&self) -> usize {
        self.k_hub
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Current yaw angle (rad).
    pub fn yaw(&self) -> f64 {
        self.yaw.angle()
    }

    /// Time of the next scheduled yaw update (s).
    pub fn next_yaw_update(&self) -> f64 {
        self.yaw.next_update()
    }

    /// Disk-averaged velocity from the last active step (m/s).
    pub fn disk_velocity(&self) -> f64 {
        self.disk_velocity
    }

    /// Thrust from the last active step.
    pub fn thrust(&self) -> f64 {
        self.thrust
    }

    /// Instantaneous power from the last active step.
    pub fn power(&self) -> f64 {
        self.power
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::stats::{NoStats, TurbineStats};
    use approx::assert_relative_eq;

    /// 10 m cells, 20 m levels.
    fn grid() -> Grid {
        Grid::from_config(&GridConfig {
            itot: 60,
            jtot: 30,
            ktot: 10,
            xsize: 600.0,
            ysize: 300.0,
            zsize: 200.0,
            ..GridConfig::default()
        })
    }

    fn config() -> TurbineConfig {
        TurbineConfig {
            diameter: 80.0,
            hub_height: 90.0,
            ..TurbineConfig::reference()
        }
    }

    fn built(config: &TurbineConfig, g: &Grid) -> Turbine {
        let mut t = Turbine::new(0, config, 300.0, 150.0, None);
        t.create(g);
        t
    }

    #[test]
    fn area_from_diameter() {
        let t = Turbine::new(0, &config(), 0.0, 0.0, None);
        assert_relative_eq!(t.area(), PI * 1600.0);
    }

    #[test]
    fn hub_override_only_when_positive() {
        let cfg = config();
        assert_eq!(Turbine::new(0, &cfg, 0.0, 0.0, Some(120.0)).hub_height(), 120.0);
        assert_eq!(Turbine::new(0, &cfg, 0.0, 0.0, Some(0.0)).hub_height(), 90.0);
        assert_eq!(Turbine::new(0, &cfg, 0.0, 0.0, Some(-1.0)).hub_height(), 90.0);
        assert_eq!(Turbine::new(0, &cfg, 0.0, 0.0, None).hub_height(), 90.0);
    }

    #[test]
    fn hub_level_tie_goes_to_lower_level() {
        // Levels at 10, 30, 50, 70, 90, ...; 80 m sits halfway between 70 and 90
        let g = grid();
        let mut t = Turbine::new(0, &config(), 300.0, 150.0, Some(80.0));
        t.create(&g);
        assert_eq!(t.hub_index(), g.kstart + 3);

        let t = built(&config(), &g);
        assert_eq!(t.hub_index(), g.kstart + 4);
    }

    #[test]
    fn create_builds_normalized_footprint() {
        let g = grid();
        let t = built(&config(), &g);
        assert!(!t.footprint().is_empty());
        assert_relative_eq!(t.footprint().weight_sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn uniform_flow_thrust_and_power() {
        let g = grid();
        let cfg = config();
        let mut t = built(&cfg, &g);
        let mut field = FlowField::uniform(&g, 8.0, 0.0);

        t.exec(0.0, &g, &mut field, &mut NoStats);

        assert_relative_eq!(t.disk_velocity(), 8.0, epsilon = 1e-12);
        assert_relative_eq!(t.thrust(), 0.5 * 0.75 * 64.0, epsilon = 1e-9);
        assert_relative_eq!(t.power(), 0.45 * 0.5 * 512.0 * t.area(), epsilon = 1e-6);
    }

    #[test]
    fn forcing_removes_thrust_from_covered_cells() {
        let g = grid();
        let mut t = built(&config(), &g);
        let mut field = FlowField::uniform(&g, 8.0, 0.0);

        t.exec(0.0, &g, &mut field, &mut NoStats);

        let removed: f64 = field.u().iter().map(|&u| 8.0 - u).sum();
        assert_relative_eq!(removed, t.thrust(), epsilon = 1e-9);
        for c in t.footprint().cells().iter().filter(|c| c.weight > 1e-6) {
            assert!(field.u()[c.index] < 8.0);
        }
    }

    #[test]
    fn reversed_flow_reverses_thrust() {
        let g = grid();
        let mut t = built(&config(), &g);
        let mut field = FlowField::uniform(&g, -8.0, 0.0);

        t.exec(0.0, &g, &mut field, &mut NoStats);

        assert!(t.thrust() < 0.0);
        assert!(t.power() < 0.0);
        // Negative thrust accelerates the reversed flow further
        for c in t.footprint().cells().iter().filter(|c| c.weight > 1e-6) {
            assert!(field.u()[c.index] > -8.0);
        }
    }

    #[test]
    fn inactive_before_start_time() {
        let g = grid();
        let cfg = TurbineConfig {
            start_time: 100.0,
            ..config()
        };
        let mut t = built(&cfg, &g);
        let mut field = FlowField::uniform(&g, 8.0, 1.0);
        let before = field.clone();

        t.exec(99.9, &g, &mut field, &mut NoStats);

        assert_eq!(t.power(), 0.0);
        assert_eq!(field, before);

        t.exec(100.0, &g, &mut field, &mut NoStats);
        assert!(t.power() > 0.0);
        assert_ne!(field, before);
    }

    #[test]
    fn early_call_keeps_previous_outputs() {
        let g = grid();
        let cfg = TurbineConfig {
            start_time: 100.0,
            dynamic_yaw: true,
            yaw_period: 10.0,
            ..config()
        };
        let mut t = built(&cfg, &g);
        let mut field = FlowField::uniform(&g, 8.0, 1.0);
        t.exec(100.0, &g, &mut field, &mut NoStats);

        let (power, thrust, velocity, yaw) = (t.power(), t.thrust(), t.disk_velocity(), t.yaw());
        let next_yaw = t.next_yaw_update();
        assert!(power > 0.0);

        let mut field = FlowField::uniform(&g, 3.0, -2.0);
        let before = field.clone();
        t.exec(50.0, &g, &mut field, &mut NoStats);

        assert_eq!(t.power(), power);
        assert_eq!(t.thrust(), thrust);
        assert_eq!(t.disk_velocity(), velocity);
        assert_eq!(t.yaw(), yaw);
        assert_eq!(t.next_yaw_update(), next_yaw);
        assert_eq!(field, before);
    }

    #[test]
    fn empty_footprint_is_inert() {
        let g = grid();
        let cfg = TurbineConfig {
            diameter: 4.0,
            ..config()
        };
        let mut t = Turbine::new(0, &cfg, 300.0, 150.0, None);
        t.create(&g);
        assert!(t.footprint().is_empty());

        let mut field = FlowField::uniform(&g, 8.0, 0.0);
        let before = field.clone();
        t.exec(0.0, &g, &mut field, &mut NoStats);

        assert_eq!(t.disk_velocity(), 0.0);
        assert_eq!(t.thrust(), 0.0);
        assert_eq!(t.power(), 0.0);
        assert_eq!(field, before);
    }

    #[test]
    fn dynamic_yaw_relaxes_toward_upstream_wind() {
        let g = grid();
        let cfg = TurbineConfig {
            dynamic_yaw: true,
            yaw_period: 10.0,
            ..config()
        };
        let mut t = built(&cfg, &g);
        let mut field = FlowField::uniform(&g, 8.0, 2.0);

        t.exec(0.0, &g, &mut field, &mut NoStats);

        assert_relative_eq!(t.yaw(), 0.2 * 2.0_f64.atan2(8.0), epsilon = 1e-12);
        assert_eq!(t.next_yaw_update(), 10.0);

        // Not due again until t = 10
        let yaw = t.yaw();
        t.exec(5.0, &g, &mut field, &mut NoStats);
        assert_eq!(t.yaw(), yaw);
        assert_eq!(t.next_yaw_update(), 10.0);
    }

    /// Flat index of the cell one diameter upstream of `t` along `yaw`.
    fn upstream_cell(g: &Grid, t: &Turbine, yaw: f64) -> usize {
        let (x, y) = t.position();
        let d = t.diameter();
        let i = g.nearest_i(x - d * yaw.cos());
        let j = g.nearest_j(y - d * yaw.sin());
        g.index(i, j, t.hub_index())
    }

    #[test]
    fn yaw_follows_only_the_upstream_hub_cell() {
        let g = grid();
        let cfg = TurbineConfig {
            dynamic_yaw: true,
            yaw_period: 10.0,
            ..config()
        };
        let mut t = built(&cfg, &g);

        // Background flow along +x; only the upstream cell at hub level veers.
        // The same column one level up carries a decoy direction.
        let first = upstream_cell(&g, &t, 0.0);
        let mut field = FlowField::uniform(&g, 8.0, 0.0);
        {
            let (u, v) = field.velocity_mut();
            u[first] = 6.0;
            v[first] = 6.0;
            u[first + g.kstride] = 6.0;
            v[first + g.kstride] = -6.0;
        }
        t.exec(0.0, &g, &mut field, &mut NoStats);

        let yaw0 = 0.2 * PI / 4.0;
        assert_relative_eq!(t.yaw(), yaw0, epsilon = 1e-12);

        // With a nonzero yaw the sample point rotates with the rotor
        let second = upstream_cell(&g, &t, yaw0);
        assert_ne!(second, first);
        let mut field = FlowField::uniform(&g, 8.0, 0.0);
        {
            let (u, v) = field.velocity_mut();
            u[first] = 6.0;
            v[first] = 6.0;
            u[second] = 5.0;
            v[second] = -5.0;
        }
        t.exec(10.0, &g, &mut field, &mut NoStats);

        let target = -PI / 4.0;
        assert_relative_eq!(t.yaw(), yaw0 + 0.2 * (target - yaw0), epsilon = 1e-12);
        assert_eq!(t.next_yaw_update(), 20.0);
    }

    #[test]
    fn static_yaw_stays_put() {
        let g = grid();
        let mut t = built(&config(), &g);
        let mut field = FlowField::uniform(&g, 8.0, 8.0);
        for step in 0..5 {
            t.exec(step as f64, &g, &mut field, &mut NoStats);
        }
        assert_eq!(t.yaw(), 0.0);
    }

    #[test]
    fn stats_follow_their_period() {
        let g = grid();
        let cfg = TurbineConfig {
            stats_enabled: true,
            stats_period: 2.0,
            ..config()
        };
        let mut t = built(&cfg, &g);
        let mut field = FlowField::uniform(&g, 8.0, 0.0);
        let mut stats = TurbineStats::new();

        for step in 0..6 {
            t.exec(step as f64, &g, &mut field, &mut stats);
        }

        let times: Vec<f64> = stats.samples().iter().map(|s| s.time).collect();
        assert_eq!(times, vec![0.0, 2.0, 4.0]);
        assert!(stats.samples().iter().all(|s| s.turbine == 0 && s.power > 0.0));
    }

    #[test]
    fn stats_disabled_records_nothing() {
        let g = grid();
        let mut t = built(&config(), &g);
        let mut field = FlowField::uniform(&g, 8.0, 0.0);
        let mut stats = TurbineStats::new();
        t.exec(0.0, &g, &mut field, &mut stats);
        assert!(stats.is_empty());
    }
}
