//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use windfarm_sim::config::{
    CaseConfig, FarmConfig, GridConfig, InflowConfig, SimulationConfig, TurbineConfig,
};
use windfarm_sim::flow::Grid;

/// 10 m cells over 1000 m x 500 m x 240 m.
pub fn grid_config() -> GridConfig {
    GridConfig {
        itot: 100,
        jtot: 50,
        ktot: 12,
        xsize: 1000.0,
        ysize: 500.0,
        zsize: 240.0,
        ..GridConfig::default()
    }
}

pub fn grid() -> Grid {
    Grid::from_config(&grid_config())
}

/// 60 m rotor at 100 m hub height, otherwise the reference turbine.
pub fn turbine() -> TurbineConfig {
    TurbineConfig {
        diameter: 60.0,
        hub_height: 100.0,
        ..TurbineConfig::reference()
    }
}

/// `rows x cols` pattern at 5 D by 3 D spacing, first turbine at (100, 100).
pub fn pattern(rows: usize, cols: usize) -> FarmConfig {
    FarmConfig {
        rows,
        cols,
        spacing_x: 5.0,
        spacing_y: 3.0,
        origin_x: 100.0,
        origin_y: 100.0,
        ..FarmConfig::default()
    }
}

/// Small case for engine runs: 2 x 2 pattern, 8 m/s inflow, 10 steps.
pub fn case() -> CaseConfig {
    CaseConfig {
        turbine: turbine(),
        windfarm: pattern(2, 2),
        grid: grid_config(),
        inflow: InflowConfig::default(),
        simulation: SimulationConfig {
            dt: 1.0,
            steps: 10,
            seed: 42,
        },
    }
}

/// Path in the system temp dir that is unique to this test process.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("windfarm_sim_{}_{name}", std::process::id()))
}

/// Writes `contents` to a fresh temp file and returns its path.
pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = temp_path(name);
    fs::write(&path, contents).expect("temp file should be writable");
    path
}
