//! Statistics sinks receiving per-turbine samples.

/// Snapshot of one turbine after a forcing step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurbineSample {
    /// Turbine id (creation order within the farm).
    pub turbine: usize,
    /// Simulation time (s).
    pub time: f64,
    /// Yaw angle (rad).
    pub yaw: f64,
    /// Disk-averaged velocity along the yaw axis (m/s).
    pub disk_velocity: f64,
    /// Thrust per unit air density.
    pub thrust: f64,
    /// Power per unit air density.
    pub power: f64,
}

/// Destination for turbine statistics.
///
/// Turbines decide *when* to sample; what happens to a sample is up to the
/// sink.
pub trait StatsSink {
    fn record_turbine(&mut self, sample: TurbineSample);
}

/// Sink that discards every sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStats;

impl StatsSink for NoStats {
    fn record_turbine(&mut self, _sample: TurbineSample) {}
}

/// Sink that keeps every sample in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct TurbineStats {
    samples: Vec<TurbineSample>,
}

impl TurbineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// All samples received so far.
    pub fn samples(&self) -> &[TurbineSample] {
        &self.samples
    }

    /// Samples of a single turbine.
    pub fn for_turbine(&self, turbine: usize) -> impl Iterator<Item = &TurbineSample> {
        self.samples.iter().filter(move |s| s.turbine == turbine)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl StatsSink for TurbineStats {
    fn record_turbine(&mut self, sample: TurbineSample) {
        self.samples.push(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(turbine: usize, time: f64) -> TurbineSample {
        TurbineSample {
            turbine,
            time,
            yaw: 0.0,
            disk_velocity: 8.0,
            thrust: 24.0,
            power: 900.0,
        }
    }

    #[test]
    fn collects_in_order() {
        let mut stats = TurbineStats::new();
        stats.record_turbine(sample(0, 0.0));
        stats.record_turbine(sample(1, 0.0));
        stats.record_turbine(sample(0, 1.0));
        assert_eq!(stats.len(), 3);
        assert_eq!(stats.samples()[1].turbine, 1);
        let times: Vec<f64> = stats.for_turbine(0).map(|s| s.time).collect();
        assert_eq!(times, vec![0.0, 1.0]);
    }

    #[test]
    fn no_stats_discards() {
        let mut sink = NoStats;
        sink.record_turbine(sample(0, 0.0));
    }
}
