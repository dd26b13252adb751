//! Actuator-disk wind farm model coupled to a gridded flow field.

/// Optional device-resident mirrors of turbine state.
pub mod accel;
pub mod cli;
pub mod config;
/// Farm layout, placement validation, and per-step orchestration.
pub mod farm;
/// Grid, flow field, and coordinate search collaborators.
pub mod flow;
pub mod io;
pub mod logging;
/// Host harness: inflow forcing, time loop, and KPIs.
pub mod sim;
pub mod stats;
/// Single-turbine actuator-disk model.
pub mod turbine;
