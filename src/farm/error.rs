use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort farm creation.
#[derive(Debug, Error)]
pub enum FarmError {
    /// A rotor disk would cross a horizontal domain edge.
    #[error(
        "turbine at ({x}, {y}) with diameter {diameter} crosses the domain boundary \
         [0, {xsize}] x [0, {ysize}]"
    )]
    BoundaryViolation {
        x: f64,
        y: f64,
        diameter: f64,
        xsize: f64,
        ysize: f64,
    },

    /// The layout file could not be opened or read.
    #[error("cannot open layout file \"{}\"", path.display())]
    LayoutUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A layout line does not hold three real numbers.
    #[error("layout file \"{}\", line {line}: {message}", path.display())]
    MalformedLayout {
        path: PathBuf,
        /// One-based line number.
        line: usize,
        message: String,
    },
}
