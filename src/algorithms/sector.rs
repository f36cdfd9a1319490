//! Eight-point compass sector classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of one compass sector in degrees
pub const SECTOR_WIDTH_DEG: f64 = 45.0;

/// Coarse 8-point direction label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// Clockwise from north
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }

    /// Centre of the sector in degrees
    pub fn center_deg(&self) -> f64 {
        match self {
            Direction::N => 0.0,
            Direction::NE => 45.0,
            Direction::E => 90.0,
            Direction::SE => 135.0,
            Direction::S => 180.0,
            Direction::SW => 225.0,
            Direction::W => 270.0,
            Direction::NW => 315.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a heading into one of eight 45° sectors.
///
/// Bins are half-open, `[start, end)`, with boundaries at odd multiples of
/// 22.5°. Headings outside [0, 360) are folded first, so 360 reads as north.
pub fn classify(heading_deg: f64) -> Direction {
    let h = heading_deg.rem_euclid(360.0);

    if (22.5..67.5).contains(&h) {
        Direction::NE
    } else if (67.5..112.5).contains(&h) {
        Direction::E
    } else if (112.5..157.5).contains(&h) {
        Direction::SE
    } else if (157.5..202.5).contains(&h) {
        Direction::S
    } else if (202.5..247.5).contains(&h) {
        Direction::SW
    } else if (247.5..292.5).contains(&h) {
        Direction::W
    } else if (292.5..337.5).contains(&h) {
        Direction::NW
    } else {
        Direction::N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_north_wraps_around_zero() {
        assert_eq!(classify(0.0), Direction::N);
        assert_eq!(classify(22.4), Direction::N);
        assert_eq!(classify(337.5), Direction::N);
        assert_eq!(classify(359.9), Direction::N);
        assert_eq!(classify(360.0), Direction::N);
    }

    #[test]
    fn test_boundaries_are_half_open() {
        assert_eq!(classify(22.5), Direction::NE);
        assert_eq!(classify(67.4), Direction::NE);
        assert_eq!(classify(67.5), Direction::E);
        assert_eq!(classify(112.5), Direction::SE);
        assert_eq!(classify(157.5), Direction::S);
        assert_eq!(classify(202.5), Direction::SW);
        assert_eq!(classify(247.5), Direction::W);
        assert_eq!(classify(292.5), Direction::NW);
        assert_eq!(classify(337.4), Direction::NW);
    }

    #[test]
    fn test_sector_centres_classify_to_themselves() {
        for direction in Direction::ALL {
            assert_eq!(classify(direction.center_deg()), direction);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Direction::SW.to_string(), "SW");
        assert_eq!(serde_json::to_string(&Direction::NE).unwrap(), "\"NE\"");
    }

    proptest! {
        #[test]
        fn prop_classification_matches_nearest_centre(h in 0.0f64..360.0) {
            let direction = classify(h);
            let diff = (h - direction.center_deg()).rem_euclid(360.0);
            let distance = diff.min(360.0 - diff);
            prop_assert!(distance <= SECTOR_WIDTH_DEG / 2.0);
        }
    }
}
