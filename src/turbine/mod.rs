/// Disk discretization onto the host grid.
pub mod footprint;
pub mod model;
/// Dynamic yaw tracking.
pub mod yaw;

pub use footprint::{DiskCell, Footprint};
pub use model::Turbine;
pub use yaw::YawTracker;
