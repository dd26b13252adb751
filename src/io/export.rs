//! CSV export for simulation step results and turbine statistics.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepResult;
use crate::stats::TurbineSample;

/// Leading columns of the step export; one `turbine_<id>_power` column per
/// turbine follows.
const STEP_HEADER: &str = "step,time,farm_power,mean_disk_velocity";

/// Column header of the turbine statistics export.
const STATS_HEADER: &str = "turbine,time,yaw,disk_velocity,thrust,power";

/// Exports step results to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_steps_csv(results: &[StepResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_steps_csv(results, io::BufWriter::new(file))
}

/// Writes step results as CSV to any writer.
///
/// The number of turbine columns is taken from the first result, so every
/// row of a run has the same width.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_steps_csv(results: &[StepResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let nturb = results.first().map_or(0, |r| r.turbine_power.len());
    let header = STEP_HEADER
        .split(',')
        .map(str::to_owned)
        .chain((0..nturb).map(|id| format!("turbine_{id}_power")));
    wtr.write_record(header)?;

    for r in results {
        let mut record = vec![
            r.step.to_string(),
            format!("{:.3}", r.time),
            format!("{:.4}", r.farm_power),
            format!("{:.6}", r.mean_disk_velocity),
        ];
        record.extend(r.turbine_power.iter().map(|p| format!("{p:.4}")));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports turbine samples to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_turbine_stats_csv(samples: &[TurbineSample], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_turbine_stats_csv(samples, io::BufWriter::new(file))
}

/// Writes turbine samples as CSV to any writer, one row per sample.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_turbine_stats_csv(samples: &[TurbineSample], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(STATS_HEADER.split(','))?;

    for s in samples {
        wtr.write_record(&[
            s.turbine.to_string(),
            format!("{:.3}", s.time),
            format!("{:.6}", s.yaw),
            format!("{:.6}", s.disk_velocity),
            format!("{:.4}", s.thrust),
            format!("{:.4}", s.power),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
