//! Wind farm simulator entry point: CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;

use log::{error, info, warn};

use windfarm_sim::cli::{self, CliOptions};
use windfarm_sim::config::CaseConfig;
use windfarm_sim::io::export::{export_steps_csv, export_turbine_stats_csv};
use windfarm_sim::logging::init_logging;
use windfarm_sim::sim::{Engine, KpiReport};

/// Loads the case selected on the command line and applies the overrides.
fn load_case(cli: &CliOptions) -> CaseConfig {
    let loaded = match (&cli.case, &cli.preset) {
        (Some(path), _) => CaseConfig::from_toml_file(path),
        (None, Some(name)) => CaseConfig::from_preset(name),
        (None, None) => CaseConfig::from_preset(cli::DEFAULT_PRESET),
    };
    let mut case = loaded.unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    if let Some(ref layout) = cli.layout {
        case.windfarm.layout_file = layout.display().to_string();
    }
    if let Some(steps) = cli.steps {
        case.simulation.steps = steps;
    }

    let errors = case.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }

    case
}

fn export_or_exit(what: &str, path: &Path, result: std::io::Result<()>) {
    if let Err(e) = result {
        error!("failed to write {what} CSV \"{}\": {e}", path.display());
        process::exit(1);
    }
    info!("{what} written to {}", path.display());
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("error: {msg}");
            cli::print_usage();
            process::exit(2);
        }
    };
    if cli.help {
        cli::print_usage();
        return;
    }

    init_logging(cli.log_level.as_deref());

    let case = load_case(&cli);

    // Build and run
    let mut engine = Engine::from_case(&case).unwrap_or_else(|e| {
        error!("farm setup failed: {e}");
        process::exit(1);
    });
    let results = engine.run();
    let kpi = KpiReport::from_results(&results, case.simulation.dt);

    // Print per-step results
    for r in &results {
        println!("{r}");
    }

    // Print KPI report
    println!("\n{kpi}");

    if let Some(ref path) = cli.out {
        export_or_exit("step results", path, export_steps_csv(&results, path));
    }
    if let Some(ref path) = cli.stats_out {
        if !case.turbine.stats_enabled {
            warn!("turbine statistics are disabled (swturbstats = false); the CSV will be empty");
        }
        let samples = engine.stats().samples();
        export_or_exit(
            "turbine statistics",
            path,
            export_turbine_stats_csv(samples, path),
        );
    }
}
