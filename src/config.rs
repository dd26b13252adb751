//! TOML-based case configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::flow::NearestSearch;

/// Top-level case configuration parsed from TOML.
///
/// `[turbine]` has no defaults for its rotor parameters and must be present;
/// every other section falls back to the defaults below. Load from TOML with
/// [`CaseConfig::from_toml_file`] or pick a built-in case with
/// [`CaseConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseConfig {
    /// Turbine rotor and control parameters, shared by every turbine.
    pub turbine: TurbineConfig,
    /// Farm layout parameters.
    #[serde(default)]
    pub windfarm: FarmConfig,
    /// Host grid dimensions.
    #[serde(default)]
    pub grid: GridConfig,
    /// Inflow forcing used by the host harness.
    #[serde(default)]
    pub inflow: InflowConfig,
    /// Time stepping of the host harness.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Turbine rotor and control parameters (`[turbine]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TurbineConfig {
    /// Rotor diameter (m).
    #[serde(rename = "diam")]
    pub diameter: f64,
    /// Default hub height (m), used unless the layout overrides it.
    #[serde(rename = "hhub")]
    pub hub_height: f64,
    /// Thrust coefficient.
    #[serde(rename = "ct")]
    pub thrust_coefficient: f64,
    /// Power coefficient.
    #[serde(rename = "cp")]
    pub power_coefficient: f64,
    /// Tip-speed ratio. Carried for completeness; not used by the disk model.
    #[serde(rename = "tsr")]
    pub tip_speed_ratio: f64,
    /// Track the upstream wind direction.
    #[serde(rename = "swdynyaw", default)]
    pub dynamic_yaw: bool,
    /// Interval between yaw updates (s).
    #[serde(rename = "yawperiod", default)]
    pub yaw_period: f64,
    /// Simulation time at which turbines start forcing the flow (s).
    #[serde(rename = "turbstarttime", default)]
    pub start_time: f64,
    /// Emit per-turbine samples to the statistics sink.
    #[serde(rename = "swturbstats", default)]
    pub stats_enabled: bool,
    /// Interval between statistics samples (s).
    #[serde(rename = "turbstatperiod", default)]
    pub stats_period: f64,
}

impl TurbineConfig {
    /// A 100 m rotor at 90 m hub height with typical coefficients.
    pub fn reference() -> Self {
        Self {
            diameter: 100.0,
            hub_height: 90.0,
            thrust_coefficient: 0.75,
            power_coefficient: 0.45,
            tip_speed_ratio: 7.0,
            dynamic_yaw: false,
            yaw_period: 0.0,
            start_time: 0.0,
            stats_enabled: false,
            stats_period: 0.0,
        }
    }
}

/// Farm layout parameters (`[windfarm]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FarmConfig {
    /// Number of turbine rows (along y).
    #[serde(rename = "nturbrows")]
    pub rows: usize,
    /// Number of turbine columns (along x).
    #[serde(rename = "nturbcols")]
    pub cols: usize,
    /// Column spacing in rotor diameters.
    #[serde(rename = "spacingx")]
    pub spacing_x: f64,
    /// Row spacing in rotor diameters.
    #[serde(rename = "spacingy")]
    pub spacing_y: f64,
    /// Offset odd rows by half a column spacing.
    #[serde(rename = "swstaggered")]
    pub staggered: bool,
    /// x position of the first turbine (m).
    #[serde(rename = "farmlocx")]
    pub origin_x: f64,
    /// y position of the first turbine (m).
    #[serde(rename = "farmlocy")]
    pub origin_y: f64,
    /// Layout file path. Empty selects the procedural layout.
    #[serde(rename = "layoutfile")]
    pub layout_file: String,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            spacing_x: 0.0,
            spacing_y: 0.0,
            staggered: false,
            origin_x: 0.0,
            origin_y: 0.0,
            layout_file: String::new(),
        }
    }
}

impl FarmConfig {
    /// Returns the layout file path, or `None` in procedural mode.
    pub fn layout_path(&self) -> Option<&Path> {
        if self.layout_file.is_empty() {
            None
        } else {
            Some(Path::new(&self.layout_file))
        }
    }
}

/// Host grid dimensions (`[grid]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Interior cells along x.
    pub itot: usize,
    /// Interior cells along y.
    pub jtot: usize,
    /// Interior cells along z.
    pub ktot: usize,
    /// Domain length in x (m).
    pub xsize: f64,
    /// Domain length in y (m).
    pub ysize: f64,
    /// Domain height (m).
    pub zsize: f64,
    /// Explicit cell-center heights; uniform spacing when absent.
    pub z: Option<Vec<f64>>,
    /// Nearest-coordinate search: `"linear"` or `"bisection"`.
    pub search: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            itot: 128,
            jtot: 64,
            ktot: 32,
            xsize: 3200.0,
            ysize: 1600.0,
            zsize: 400.0,
            z: None,
            search: "linear".to_string(),
        }
    }
}

/// Inflow forcing of the host harness (`[inflow]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InflowConfig {
    /// Inflow wind speed (m/s).
    pub speed: f64,
    /// Direction the wind blows towards, counter-clockwise from +x (degrees).
    pub direction_deg: f64,
    /// Fraction of the deviation from inflow removed per step, in (0, 1].
    pub relaxation: f64,
    /// Standard deviation of per-cell Gaussian velocity noise (m/s).
    pub noise_std: f64,
}

impl Default for InflowConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            direction_deg: 0.0,
            relaxation: 0.5,
            noise_std: 0.0,
        }
    }
}

impl InflowConfig {
    /// Inflow velocity components `(u, v)`.
    pub fn velocity(&self) -> (f64, f64) {
        let dir = self.direction_deg.to_radians();
        (self.speed * dir.cos(), self.speed * dir.sin())
    }
}

/// Time stepping of the host harness (`[simulation]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Time step (s).
    pub dt: f64,
    /// Number of steps to run.
    pub steps: usize,
    /// Seed for inflow noise.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 1.0,
            steps: 600,
            seed: 42,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"turbine.diam"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl CaseConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["single", "aligned", "staggered"];

    /// A single turbine in the middle of the default domain.
    pub fn single() -> Self {
        let grid = GridConfig::default();
        Self {
            turbine: TurbineConfig::reference(),
            windfarm: FarmConfig {
                origin_x: 0.25 * grid.xsize,
                origin_y: 0.5 * grid.ysize,
                ..FarmConfig::default()
            },
            grid,
            inflow: InflowConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }

    /// A 3 x 4 aligned farm, 7D column and 4D row spacing.
    pub fn aligned() -> Self {
        Self {
            turbine: TurbineConfig::reference(),
            windfarm: FarmConfig {
                rows: 3,
                cols: 4,
                spacing_x: 7.0,
                spacing_y: 4.0,
                origin_x: 300.0,
                origin_y: 400.0,
                ..FarmConfig::default()
            },
            grid: GridConfig::default(),
            inflow: InflowConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }

    /// The aligned farm with staggered rows, dynamic yaw and a veering,
    /// noisy inflow.
    pub fn staggered() -> Self {
        let aligned = Self::aligned();
        Self {
            turbine: TurbineConfig {
                dynamic_yaw: true,
                yaw_period: 10.0,
                stats_enabled: true,
                stats_period: 10.0,
                ..TurbineConfig::reference()
            },
            windfarm: FarmConfig {
                staggered: true,
                ..aligned.windfarm
            },
            inflow: InflowConfig {
                direction_deg: 8.0,
                noise_std: 0.2,
                ..InflowConfig::default()
            },
            ..aligned
        }
    }

    /// Loads a case from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "single" => Ok(Self::single()),
            "aligned" => Ok(Self::aligned()),
            "staggered" => Ok(Self::staggered()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a case from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("case", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a case from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, misses a required key,
    /// or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid. Placement of
    /// individual turbines is checked later, when the farm is created.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let t = &self.turbine;
        let f = &self.windfarm;
        let reals = [
            ("turbine.diam", t.diameter),
            ("turbine.hhub", t.hub_height),
            ("turbine.ct", t.thrust_coefficient),
            ("turbine.cp", t.power_coefficient),
            ("turbine.tsr", t.tip_speed_ratio),
            ("turbine.yawperiod", t.yaw_period),
            ("turbine.turbstarttime", t.start_time),
            ("turbine.turbstatperiod", t.stats_period),
            ("windfarm.spacingx", f.spacing_x),
            ("windfarm.spacingy", f.spacing_y),
            ("windfarm.farmlocx", f.origin_x),
            ("windfarm.farmlocy", f.origin_y),
            ("grid.xsize", self.grid.xsize),
            ("grid.ysize", self.grid.ysize),
            ("grid.zsize", self.grid.zsize),
            ("inflow.speed", self.inflow.speed),
            ("inflow.direction_deg", self.inflow.direction_deg),
            ("inflow.relaxation", self.inflow.relaxation),
            ("inflow.noise_std", self.inflow.noise_std),
            ("simulation.dt", self.simulation.dt),
        ];
        for (field, value) in reals {
            if !value.is_finite() {
                errors.push(ConfigError::new(field, format!("must be finite, got {value}")));
            }
        }

        if t.diameter <= 0.0 {
            errors.push(ConfigError::new("turbine.diam", "must be > 0"));
        }
        if t.hub_height <= 0.0 {
            errors.push(ConfigError::new("turbine.hhub", "must be > 0"));
        }
        if t.thrust_coefficient < 0.0 {
            errors.push(ConfigError::new("turbine.ct", "must be >= 0"));
        }
        if t.power_coefficient < 0.0 {
            errors.push(ConfigError::new("turbine.cp", "must be >= 0"));
        }
        if t.yaw_period < 0.0 {
            errors.push(ConfigError::new("turbine.yawperiod", "must be >= 0"));
        }
        if t.stats_period < 0.0 {
            errors.push(ConfigError::new("turbine.turbstatperiod", "must be >= 0"));
        }

        if f.spacing_x < 0.0 {
            errors.push(ConfigError::new("windfarm.spacingx", "must be >= 0"));
        }
        if f.spacing_y < 0.0 {
            errors.push(ConfigError::new("windfarm.spacingy", "must be >= 0"));
        }

        let g = &self.grid;
        if g.itot == 0 || g.jtot == 0 || g.ktot == 0 {
            errors.push(ConfigError::new("grid.itot", "cell counts must be > 0"));
        }
        if g.xsize <= 0.0 || g.ysize <= 0.0 || g.zsize <= 0.0 {
            errors.push(ConfigError::new("grid.xsize", "domain extents must be > 0"));
        }
        if let Some(levels) = &g.z {
            if levels.len() != g.ktot {
                errors.push(ConfigError::new(
                    "grid.z",
                    format!("expected {} levels, got {}", g.ktot, levels.len()),
                ));
            }
            if levels.iter().any(|z| !z.is_finite()) {
                errors.push(ConfigError::new("grid.z", "levels must be finite"));
            }
            if levels.windows(2).any(|w| w[1] <= w[0]) {
                errors.push(ConfigError::new("grid.z", "levels must be strictly increasing"));
            }
        }
        if NearestSearch::from_name(&g.search).is_none() {
            errors.push(ConfigError::new(
                "grid.search",
                format!(
                    "must be one of {}, got \"{}\"",
                    NearestSearch::NAMES.join(", "),
                    g.search
                ),
            ));
        }

        let i = &self.inflow;
        if i.relaxation <= 0.0 || i.relaxation > 1.0 {
            errors.push(ConfigError::new("inflow.relaxation", "must be in (0.0, 1.0]"));
        }
        if i.noise_std < 0.0 {
            errors.push(ConfigError::new("inflow.noise_std", "must be >= 0"));
        }

        let s = &self.simulation;
        if s.dt <= 0.0 {
            errors.push(ConfigError::new("simulation.dt", "must be > 0"));
        }
        if s.steps == 0 {
            errors.push(ConfigError::new("simulation.steps", "must be > 0"));
        }

        errors
    }
}
