//! Logger setup for the `windfarm-sim` binary.

use std::io::Write;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Resolves the log level: an explicit `level` wins, then `RUST_LOG`, then
/// `info`. Unparseable values fall through to the next source.
pub fn resolve_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| {
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|v| v.parse::<LevelFilter>().ok())
        })
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global logger, writing to stderr so step output on stdout
/// stays machine-readable.
///
/// Calling it again after a logger is installed has no effect.
pub fn init_logging(level: Option<&str>) {
    let log_level = resolve_level(level);

    let installed = Builder::new()
        .filter_level(log_level)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .is_ok();

    if installed {
        log::debug!("logging initialized (level: {log_level})");
    }
}
