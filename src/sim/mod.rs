pub mod clock;
pub mod engine;
/// Relaxation toward the configured inflow.
pub mod inflow;
pub mod kpi;
pub mod types;

pub use engine::Engine;
pub use kpi::KpiReport;
pub use types::StepResult;
