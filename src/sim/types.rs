//! Per-step records of the host harness.

use std::fmt;

/// Complete record of one simulation step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Step index.
    pub step: usize,
    /// Simulation time (s).
    pub time: f64,
    /// Farm aggregate power.
    pub farm_power: f64,
    /// Power of each turbine, in execution order.
    pub turbine_power: Vec<f64>,
    /// Mean disk-averaged velocity over all turbines (m/s).
    pub mean_disk_velocity: f64,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step={:>5} t={:>8.1}s | farm={:>12.1} | turbines={} | <u_disk>={:>6.3} m/s",
            self.step,
            self.time,
            self.farm_power,
            self.turbine_power.len(),
            self.mean_disk_velocity,
        )
    }
}
