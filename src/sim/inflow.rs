//! Stand-in for the host solver: relaxes the flow back toward a fixed inflow.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::InflowConfig;
use crate::flow::FlowField;

/// Nudges every cell toward the inflow velocity once per step.
///
/// Each call removes a fixed fraction of the deviation from the inflow
/// vector and optionally adds independent Gaussian noise per cell, so the
/// momentum deficit left by the turbines recovers over a few steps.
#[derive(Debug, Clone)]
pub struct InflowForcing {
    u: f64,
    v: f64,
    relaxation: f64,
    noise_std: f64,
    rng: StdRng,
}

impl InflowForcing {
    /// Creates the forcing from `config`, seeding the noise with `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `relaxation` is outside `(0, 1]`.
    pub fn new(config: &InflowConfig, seed: u64) -> Self {
        assert!(config.relaxation > 0.0 && config.relaxation <= 1.0);
        let (u, v) = config.velocity();
        Self {
            u,
            v,
            relaxation: config.relaxation,
            noise_std: config.noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Inflow velocity `(u, v)`.
    pub fn velocity(&self) -> (f64, f64) {
        (self.u, self.v)
    }

    /// Applies one relaxation step to `field`.
    pub fn apply(&mut self, field: &mut FlowField) {
        let (u, v) = field.velocity_mut();
        for (uc, vc) in u.iter_mut().zip(v.iter_mut()) {
            *uc += self.relaxation * (self.u - *uc) + gaussian_noise(&mut self.rng, self.noise_std);
            *vc += self.relaxation * (self.v - *vc) + gaussian_noise(&mut self.rng, self.noise_std);
        }
    }
}

/// Zero-mean Gaussian sample via the Box-Muller transform.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}
