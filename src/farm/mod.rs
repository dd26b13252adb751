pub mod error;
/// Candidate positions: layout files and regular patterns.
pub mod layout;
pub mod windfarm;

pub use error::FarmError;
pub use layout::Placement;
pub use windfarm::Windfarm;
