use std::env;
use std::path::PathBuf;

use log::LevelFilter;

/// Preset used when neither `--case` nor `--preset` is given.
pub const DEFAULT_PRESET: &str = "aligned";

#[derive(Debug, Default)]
pub struct CliOptions {
    pub case: Option<PathBuf>,
    pub preset: Option<String>,
    pub layout: Option<PathBuf>,
    pub steps: Option<usize>,
    pub out: Option<PathBuf>,
    pub stats_out: Option<PathBuf>,
    pub log_level: Option<String>,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        return Ok(CliOptions {
            help: true,
            ..CliOptions::default()
        });
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--case" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --case (expected a TOML file path)",
                )?;
                if opts.case.replace(PathBuf::from(path)).is_some() {
                    return Err("--case provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --preset (expected a preset name)",
                )?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--layout" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --layout (expected a layout file path)",
                )?;
                if opts.layout.replace(PathBuf::from(path)).is_some() {
                    return Err("--layout provided more than once".to_string());
                }
            }
            "--steps" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --steps (expected a step count)",
                )?;
                let steps = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--steps value \"{raw}\" is not a valid step count"))?;
                if opts.steps.replace(steps).is_some() {
                    return Err("--steps provided more than once".to_string());
                }
            }
            "--out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --out (expected a CSV file path)",
                )?;
                if opts.out.replace(PathBuf::from(path)).is_some() {
                    return Err("--out provided more than once".to_string());
                }
            }
            "--stats-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --stats-out (expected a CSV file path)",
                )?;
                if opts.stats_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--stats-out provided more than once".to_string());
                }
            }
            "--log-level" => {
                i += 1;
                let level = args.next_or_err(
                    i,
                    "missing value for --log-level (expected off|error|warn|info|debug|trace)",
                )?;
                if level.parse::<LevelFilter>().is_err() {
                    return Err(format!("unknown log level \"{level}\""));
                }
                if opts.log_level.replace(level.to_string()).is_some() {
                    return Err("--log-level provided more than once".to_string());
                }
            }
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.case.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--case` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.case.is_none() && opts.preset.is_none() {
        opts.preset = Some(DEFAULT_PRESET.to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("windfarm-sim: actuator-disk wind farm on a gridded flow field");
    eprintln!();
    eprintln!("Usage: windfarm-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --case <path>        Load the case from a TOML file");
    eprintln!("  --preset <name>      Use a built-in case (single, aligned, staggered)");
    eprintln!("  --layout <path>      Read turbine positions from a layout file");
    eprintln!("  --steps <n>          Override the number of steps");
    eprintln!("  --out <path>         Export step results to CSV");
    eprintln!("  --stats-out <path>   Export turbine statistics to CSV");
    eprintln!("  --log-level <level>  Log level (default: RUST_LOG, then info)");
    eprintln!("  --help               Show this help message");
    eprintln!();
    eprintln!("If no --case or --preset is given, the {DEFAULT_PRESET} preset is used.");
}
