pub mod field;
pub mod grid;
/// Nearest-coordinate lookups over ordered coordinate vectors.
pub mod search;

pub use field::FlowField;
pub use grid::Grid;
pub use search::NearestSearch;
