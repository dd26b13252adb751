//! Candidate turbine positions from a layout file or a regular pattern.

use std::fs;
use std::path::Path;

use crate::config::FarmConfig;

use super::error::FarmError;

/// Candidate turbine position, not yet validated against the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Rotor center x (m).
    pub x: f64,
    /// Rotor center y (m).
    pub y: f64,
    /// Per-turbine hub height, when it differs from the configured one.
    pub hub_override: Option<f64>,
}

impl Placement {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            hub_override: None,
        }
    }
}

/// Generates a `rows x cols` pattern, row by row.
///
/// Column `c` of row `r` sits at
/// `(origin_x + c·spacing_x·D + offset, origin_y + r·spacing_y·D)`, where
/// `offset` is half a column spacing on odd rows of a staggered farm and zero
/// otherwise.
pub fn procedural(farm: &FarmConfig, diameter: f64) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(farm.rows * farm.cols);
    for r in 0..farm.rows {
        let y = farm.origin_y + r as f64 * farm.spacing_y * diameter;
        let offset = if farm.staggered && r % 2 == 1 {
            0.5 * farm.spacing_x * diameter
        } else {
            0.0
        };
        for c in 0..farm.cols {
            let x = farm.origin_x + c as f64 * farm.spacing_x * diameter + offset;
            placements.push(Placement::new(x, y));
        }
    }
    placements
}

/// Reads placements from a layout file. See [`parse_layout`] for the format.
///
/// # Errors
///
/// Returns [`FarmError::LayoutUnreadable`] if the file cannot be read and
/// [`FarmError::MalformedLayout`] for a bad line.
pub fn read_layout_file(path: &Path) -> Result<Vec<Placement>, FarmError> {
    let text = fs::read_to_string(path).map_err(|source| FarmError::LayoutUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layout(&text, path)
}

/// Parses layout text: one turbine per line as `x y hub_height_override`.
///
/// A non-positive override selects the configured hub height. Blank lines
/// and lines starting with `#` are skipped. `path` is only used in errors.
///
/// # Errors
///
/// Returns [`FarmError::MalformedLayout`] when a line does not hold exactly
/// three real numbers.
pub fn parse_layout(text: &str, path: &Path) -> Result<Vec<Placement>, FarmError> {
    let mut placements = Vec::new();

    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let malformed = |message: String| FarmError::MalformedLayout {
            path: path.to_path_buf(),
            line: n + 1,
            message,
        };

        let values = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| malformed(format!("\"{tok}\" is not a number")))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let [x, y, hub] = values[..] else {
            return Err(malformed(format!(
                "expected 3 values (x y hub_height), got {}",
                values.len()
            )));
        };
        if !(x.is_finite() && y.is_finite() && hub.is_finite()) {
            return Err(malformed(format!("non-finite value in \"{line}\"")));
        }

        placements.push(Placement {
            x,
            y,
            hub_override: (hub > 0.0).then_some(hub),
        });
    }

    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm(rows: usize, cols: usize, staggered: bool) -> FarmConfig {
        FarmConfig {
            rows,
            cols,
            spacing_x: 5.0,
            spacing_y: 3.0,
            staggered,
            origin_x: 100.0,
            origin_y: 200.0,
            ..FarmConfig::default()
        }
    }

    #[test]
    fn aligned_pattern_positions() {
        let p = procedural(&farm(2, 3, false), 80.0);
        assert_eq!(p.len(), 6);
        for r in 0..2 {
            for c in 0..3 {
                let got = p[r * 3 + c];
                assert_eq!(got.x, 100.0 + c as f64 * 400.0);
                assert_eq!(got.y, 200.0 + r as f64 * 240.0);
                assert_eq!(got.hub_override, None);
            }
        }
    }

    #[test]
    fn staggering_shifts_odd_rows_only() {
        let aligned = procedural(&farm(4, 2, false), 80.0);
        let staggered = procedural(&farm(4, 2, true), 80.0);
        for (idx, (a, s)) in aligned.iter().zip(&staggered).enumerate() {
            let row = idx / 2;
            let shift = if row % 2 == 1 { 200.0 } else { 0.0 };
            assert_eq!(s.x, a.x + shift);
            assert_eq!(s.y, a.y);
        }
    }

    #[test]
    fn empty_pattern() {
        assert!(procedural(&farm(0, 5, false), 80.0).is_empty());
    }

    #[test]
    fn parses_override_and_default() {
        let p = parse_layout("100 200 80\n300 200 -1\n", Path::new("farm.txt"))
            .expect("layout should parse");
        assert_eq!(p.len(), 2);
        assert_eq!(p[0], Placement { x: 100.0, y: 200.0, hub_override: Some(80.0) });
        assert_eq!(p[1].hub_override, None);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let text = "# x y hh\n\n  150.5\t220.0   0\n";
        let p = parse_layout(text, Path::new("farm.txt")).expect("layout should parse");
        assert_eq!(p.len(), 1);
        assert_eq!(p[0].x, 150.5);
        assert_eq!(p[0].hub_override, None);
    }

    #[test]
    fn rejects_short_line() {
        let err = parse_layout("100 200 80\n300 200\n", Path::new("farm.txt"));
        assert!(matches!(err, Err(FarmError::MalformedLayout { line: 2, .. })));
    }

    #[test]
    fn rejects_non_numeric_token() {
        let err = parse_layout("100 abc 80\n", Path::new("farm.txt"));
        match err {
            Err(FarmError::MalformedLayout { line, message, .. }) => {
                assert_eq!(line, 1);
                assert!(message.contains("abc"));
            }
            other => panic!("expected MalformedLayout, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        for text in ["nan 200 80\n", "100 inf 80\n", "100 200 80\n100 200 NaN\n"] {
            let err = parse_layout(text, Path::new("farm.txt"));
            assert!(
                matches!(err, Err(FarmError::MalformedLayout { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = read_layout_file(Path::new("/nonexistent/windfarm/layout.txt"));
        assert!(matches!(err, Err(FarmError::LayoutUnreadable { .. })));
    }
}
