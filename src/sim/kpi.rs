//! Post-hoc KPI computation from simulation results.

use std::fmt;

use super::types::StepResult;

/// Aggregate indicators derived from a complete simulation run.
///
/// Computed post-hoc from `Vec<StepResult>` so the summary always agrees with
/// the exported step data. Power values are per unit air density.
#[derive(Debug, Clone)]
pub struct KpiReport {
    /// Number of steps summarized.
    pub steps: usize,
    /// Mean farm power over all steps.
    pub mean_farm_power: f64,
    /// Highest farm power of any step.
    pub peak_farm_power: f64,
    /// Farm energy, sum of farm power * dt.
    pub energy: f64,
    /// Mean power of each turbine, in execution order.
    pub mean_turbine_power: Vec<f64>,
}

impl KpiReport {
    /// Computes all KPIs from the complete step record vector.
    ///
    /// # Arguments
    ///
    /// * `results` - Complete simulation step results
    /// * `dt` - Time step (s)
    pub fn from_results(results: &[StepResult], dt: f64) -> Self {
        let Some(first) = results.first() else {
            return Self {
                steps: 0,
                mean_farm_power: 0.0,
                peak_farm_power: 0.0,
                energy: 0.0,
                mean_turbine_power: Vec::new(),
            };
        };

        let n = results.len() as f64;
        let mut farm_sum = 0.0_f64;
        let mut peak = f64::NEG_INFINITY;
        let mut turbine_sum = vec![0.0_f64; first.turbine_power.len()];

        for r in results {
            farm_sum += r.farm_power;
            peak = peak.max(r.farm_power);
            for (acc, p) in turbine_sum.iter_mut().zip(&r.turbine_power) {
                *acc += p;
            }
        }

        Self {
            steps: results.len(),
            mean_farm_power: farm_sum / n,
            peak_farm_power: peak,
            energy: farm_sum * dt,
            mean_turbine_power: turbine_sum.into_iter().map(|s| s / n).collect(),
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Steps:              {}", self.steps)?;
        writeln!(f, "Mean farm power:    {:.1}", self.mean_farm_power)?;
        writeln!(f, "Peak farm power:    {:.1}", self.peak_farm_power)?;
        write!(f, "Farm energy:        {:.1}", self.energy)?;
        for (id, p) in self.mean_turbine_power.iter().enumerate() {
            write!(f, "\n  turbine {id:>3}:      {p:.1}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_result(step: usize, turbine_power: Vec<f64>) -> StepResult {
        StepResult {
            step,
            time: step as f64,
            farm_power: turbine_power.iter().sum(),
            turbine_power,
            mean_disk_velocity: 0.0,
        }
    }

    #[test]
    fn mean_peak_and_energy() {
        let results = vec![
            make_result(0, vec![1.0, 2.0]),
            make_result(1, vec![3.0, 4.0]),
            make_result(2, vec![2.0, 0.0]),
        ];
        let kpi = KpiReport::from_results(&results, 0.5);
        // farm: 3, 7, 2
        assert_relative_eq!(kpi.mean_farm_power, 4.0);
        assert_relative_eq!(kpi.peak_farm_power, 7.0);
        assert_relative_eq!(kpi.energy, 6.0);
        assert_eq!(kpi.mean_turbine_power, vec![2.0, 2.0]);
    }

    #[test]
    fn empty_results() {
        let kpi = KpiReport::from_results(&[], 1.0);
        assert_eq!(kpi.steps, 0);
        assert_eq!(kpi.energy, 0.0);
        assert!(kpi.mean_turbine_power.is_empty());
    }

    #[test]
    fn display_lists_every_turbine() {
        let results = vec![make_result(0, vec![1.0, 2.0, 3.0])];
        let text = KpiReport::from_results(&results, 1.0).to_string();
        assert!(text.contains("turbine   2"));
    }
}
