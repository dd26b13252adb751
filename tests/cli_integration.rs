mod common;

use std::fs;
use std::process::Command;

#[test]
fn preset_run_writes_step_and_stats_csv() {
    let out = common::temp_path("cli_steps.csv");
    let stats_out = common::temp_path("cli_stats.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_windfarm-sim"))
        .args(["--preset", "staggered", "--steps", "12", "--log-level", "warn"])
        .arg("--out")
        .arg(&out)
        .arg("--stats-out")
        .arg(&stats_out)
        .output()
        .expect("windfarm-sim process should run");

    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("--- KPI Report ---"));

    let steps = fs::read_to_string(&out).expect("step CSV should exist");
    let stats = fs::read_to_string(&stats_out).expect("stats CSV should exist");
    fs::remove_file(&out).ok();
    fs::remove_file(&stats_out).ok();

    // 1 header + 12 rows; the staggered preset has 12 turbines
    let lines: Vec<&str> = steps.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0].split(',').count(), 4 + 12);

    // Stats every 10 s: t = 0 and t = 10 for each turbine
    assert_eq!(stats.lines().count(), 1 + 2 * 12);
}

#[test]
fn layout_override_places_turbines_from_file() {
    let layout = common::write_temp("cli_layout.txt", "500 800 0\n1500 800 120\n");
    let out = common::temp_path("cli_layout_steps.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_windfarm-sim"))
        .args(["--preset", "single", "--steps", "3", "--log-level", "off"])
        .arg("--layout")
        .arg(&layout)
        .arg("--out")
        .arg(&out)
        .output()
        .expect("windfarm-sim process should run");

    fs::remove_file(&layout).ok();
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let steps = fs::read_to_string(&out).expect("step CSV should exist");
    fs::remove_file(&out).ok();
    let header = steps.lines().next().expect("step CSV should have a header");
    assert!(header.ends_with("turbine_0_power,turbine_1_power"));
}

#[test]
fn out_of_domain_layout_fails_with_exit_code() {
    let layout = common::write_temp("cli_bad_layout.txt", "10 800 0\n");

    let output = Command::new(env!("CARGO_BIN_EXE_windfarm-sim"))
        .args(["--preset", "single", "--steps", "1"])
        .arg("--layout")
        .arg(&layout)
        .output()
        .expect("windfarm-sim process should run");
    fs::remove_file(&layout).ok();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("domain boundary"), "stderr={stderr}");
}

#[test]
fn unknown_argument_is_a_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_windfarm-sim"))
        .arg("--turbines")
        .output()
        .expect("windfarm-sim process should run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unknown_preset_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_windfarm-sim"))
        .args(["--preset", "offshore"])
        .output()
        .expect("windfarm-sim process should run");
    assert_eq!(output.status.code(), Some(1));
}
