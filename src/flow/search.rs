use std::ops::Range;

/// Strategy for finding the coordinate closest to a target value.
///
/// Both strategies return the same index: the first index in the range whose
/// absolute distance to the target is strictly smaller than every earlier
/// one, so ties resolve to the lower index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearestSearch {
    /// Scan every coordinate in the range. Works on any ordering.
    #[default]
    Linear,
    /// Binary search. Requires coordinates sorted ascending.
    Bisection,
}

impl NearestSearch {
    /// Names accepted by [`NearestSearch::from_name`].
    pub const NAMES: &[&str] = &["linear", "bisection"];

    /// Parses a strategy from its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::Linear),
            "bisection" => Some(Self::Bisection),
            _ => None,
        }
    }

    /// Returns the index in `range` of the coordinate nearest to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty or extends past `coords`.
    pub fn nearest(self, coords: &[f64], value: f64, range: Range<usize>) -> usize {
        assert!(range.start < range.end && range.end <= coords.len());
        match self {
            Self::Linear => linear(coords, value, range),
            Self::Bisection => bisection(coords, value, range),
        }
    }
}

fn linear(coords: &[f64], value: f64, range: Range<usize>) -> usize {
    let mut best = range.start;
    let mut min_diff = (coords[range.start] - value).abs();
    for i in range.start + 1..range.end {
        let diff = (coords[i] - value).abs();
        if diff < min_diff {
            min_diff = diff;
            best = i;
        }
    }
    best
}

fn bisection(coords: &[f64], value: f64, range: Range<usize>) -> usize {
    let slice = &coords[range.clone()];
    let upper = range.start + slice.partition_point(|&c| c < value);

    if upper == range.start {
        return range.start;
    }

    // Walk back over repeated coordinates so the earliest one wins.
    let mut lower = upper - 1;
    while lower > range.start && coords[lower - 1] == coords[lower] {
        lower -= 1;
    }

    if upper == range.end {
        return lower;
    }

    if (coords[lower] - value).abs() <= (coords[upper] - value).abs() {
        lower
    } else {
        upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centers(n: usize, spacing: f64) -> Vec<f64> {
        (0..n).map(|i| (i as f64 + 0.5) * spacing).collect()
    }

    #[test]
    fn from_name_round_trips_known_names() {
        assert_eq!(NearestSearch::from_name("linear"), Some(NearestSearch::Linear));
        assert_eq!(
            NearestSearch::from_name("bisection"),
            Some(NearestSearch::Bisection)
        );
        assert_eq!(NearestSearch::from_name("kd-tree"), None);
    }

    #[test]
    fn linear_finds_closest() {
        let z = centers(10, 10.0);
        assert_eq!(NearestSearch::Linear.nearest(&z, 37.0, 0..10), 3);
        assert_eq!(NearestSearch::Linear.nearest(&z, -100.0, 0..10), 0);
        assert_eq!(NearestSearch::Linear.nearest(&z, 1e6, 0..10), 9);
    }

    #[test]
    fn tie_goes_to_lower_index() {
        let z = centers(10, 10.0);
        // 20.0 is exactly between 15.0 (index 1) and 25.0 (index 2)
        assert_eq!(NearestSearch::Linear.nearest(&z, 20.0, 0..10), 1);
        assert_eq!(NearestSearch::Bisection.nearest(&z, 20.0, 0..10), 1);
    }

    #[test]
    fn respects_range_bounds() {
        let z = centers(10, 10.0);
        assert_eq!(NearestSearch::Linear.nearest(&z, 5.0, 3..7), 3);
        assert_eq!(NearestSearch::Bisection.nearest(&z, 5.0, 3..7), 3);
        assert_eq!(NearestSearch::Linear.nearest(&z, 95.0, 3..7), 6);
        assert_eq!(NearestSearch::Bisection.nearest(&z, 95.0, 3..7), 6);
    }

    #[test]
    fn bisection_matches_linear_on_sweep() {
        let z = centers(32, 12.5);
        let mut value = -20.0;
        while value < 450.0 {
            assert_eq!(
                NearestSearch::Linear.nearest(&z, value, 1..31),
                NearestSearch::Bisection.nearest(&z, value, 1..31),
                "mismatch at {value}"
            );
            value += 0.625;
        }
    }

    #[test]
    fn bisection_prefers_first_of_repeated_coordinates() {
        let z = vec![0.0, 10.0, 10.0, 10.0, 30.0];
        assert_eq!(NearestSearch::Linear.nearest(&z, 12.0, 0..5), 1);
        assert_eq!(NearestSearch::Bisection.nearest(&z, 12.0, 0..5), 1);
    }

    #[test]
    #[should_panic]
    fn empty_range_panics() {
        let z = centers(4, 1.0);
        NearestSearch::Linear.nearest(&z, 0.0, 2..2);
    }
}
