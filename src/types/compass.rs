//! Defines the `CompassPoint` enum, mapping wind bearings in degrees onto the 16-point
//! compass rose.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of one compass sector in degrees.
pub const SECTOR_WIDTH: f64 = 22.5;

/// One of the 16 compass points, each covering a 22.5° sector centred on its bearing.
///
/// Sectors are half-open, `[start, end)`. North is centred on 0° and so spans
/// `[348.75, 360)` together with `[0, 11.25)`; every other point owns one contiguous
/// range, e.g. [`CompassPoint::SSW`] covers `[191.25, 213.75)`.
///
/// Variants are named after their labels and serialize as those labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All points clockwise from north.
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Maps any integer bearing, negative or above 360, onto its compass point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skycast::CompassPoint;
    ///
    /// assert_eq!(CompassPoint::from_degrees(200), CompassPoint::SSW);
    /// assert_eq!(CompassPoint::from_degrees(0), CompassPoint::N);
    /// assert_eq!(CompassPoint::from_degrees(350), CompassPoint::N);
    /// assert_eq!(CompassPoint::from_degrees(-10), CompassPoint::N);
    /// assert_eq!(CompassPoint::from_degrees(405), CompassPoint::NE);
    /// ```
    pub fn from_degrees(degrees: i64) -> Self {
        Self::from_bearing(degrees.rem_euclid(360) as f64)
    }

    /// Same as [`CompassPoint::from_degrees`] for fractional bearings.
    ///
    /// Non-finite input has no direction and is treated as north.
    pub fn from_bearing(bearing: f64) -> Self {
        if !bearing.is_finite() {
            return CompassPoint::N;
        }
        let normalized = bearing.rem_euclid(360.0);
        let index = ((normalized + SECTOR_WIDTH / 2.0) / SECTOR_WIDTH).floor() as usize % 16;
        Self::ALL[index]
    }

    /// Position clockwise from north, `0..16`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The sector as `(start, end)` degrees. North's start is negative (`-11.25`);
    /// add 360 to get its upper range.
    pub fn sector(self) -> (f64, f64) {
        let centre = self.index() as f64 * SECTOR_WIDTH;
        (centre - SECTOR_WIDTH / 2.0, centre + SECTOR_WIDTH / 2.0)
    }

    pub fn label(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCompassLabel(pub String);

impl fmt::Display for UnknownCompassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a 16-point compass label", self.0)
    }
}

impl std::error::Error for UnknownCompassLabel {}

impl FromStr for CompassPoint {
    type Err = UnknownCompassLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|point| point.label() == s)
            .ok_or_else(|| UnknownCompassLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_values() {
        assert_eq!(CompassPoint::from_bearing(0.0), CompassPoint::N);
        assert_eq!(CompassPoint::from_bearing(11.24), CompassPoint::N);
        assert_eq!(CompassPoint::from_bearing(11.25), CompassPoint::NNE);
        assert_eq!(CompassPoint::from_bearing(326.25), CompassPoint::NNW);
        assert_eq!(CompassPoint::from_bearing(348.74), CompassPoint::NNW);
        assert_eq!(CompassPoint::from_bearing(348.75), CompassPoint::N);
        assert_eq!(CompassPoint::from_bearing(359.99), CompassPoint::N);
        assert_eq!(CompassPoint::from_degrees(360), CompassPoint::N);
        assert_eq!(CompassPoint::from_degrees(-10), CompassPoint::N);
    }

    #[test]
    fn test_fixed_sector_table() {
        let table = [
            ("NNE", 11.25, 33.75),
            ("NE", 33.75, 56.25),
            ("ENE", 56.25, 78.75),
            ("E", 78.75, 101.25),
            ("ESE", 101.25, 123.75),
            ("SE", 123.75, 146.25),
            ("SSE", 146.25, 168.75),
            ("S", 168.75, 191.25),
            ("SSW", 191.25, 213.75),
            ("SW", 213.75, 236.25),
            ("WSW", 236.25, 258.75),
            ("W", 258.75, 281.25),
            ("WNW", 281.25, 303.75),
            ("NW", 303.75, 326.25),
            ("NNW", 326.25, 348.75),
        ];
        for (label, start, end) in table {
            let point: CompassPoint = label.parse().unwrap();
            assert_eq!(point.sector(), (start, end), "{label}");
            assert_eq!(CompassPoint::from_bearing(start), point);
            assert_eq!(CompassPoint::from_bearing(end - 0.01), point);
        }
        assert_eq!(CompassPoint::N.sector(), (-11.25, 11.25));
    }

    #[test]
    fn test_every_integer_degree_maps_to_exactly_one_sector() {
        for degrees in -720..=720_i64 {
            let normalized = degrees.rem_euclid(360) as f64;
            let point = CompassPoint::from_degrees(degrees);
            let containing: Vec<CompassPoint> = CompassPoint::ALL
                .into_iter()
                .filter(|p| {
                    let (start, end) = p.sector();
                    (start..end).contains(&normalized) || (start..end).contains(&(normalized - 360.0))
                })
                .collect();
            assert_eq!(containing, vec![point], "degrees {degrees}");
        }
    }

    #[test]
    fn test_sectors_tile_the_circle() {
        let mut edges: Vec<(f64, f64)> = CompassPoint::ALL.iter().map(|p| p.sector()).collect();
        edges.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        for pair in edges.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        let total: f64 = edges.iter().map(|(s, e)| e - s).sum();
        assert_eq!(total, 360.0);
    }

    #[test]
    fn test_labels_round_trip_and_serialize() {
        for point in CompassPoint::ALL {
            assert_eq!(point.label().parse::<CompassPoint>(), Ok(point));
            assert_eq!(serde_json::to_string(&point).unwrap(), format!("\"{point}\""));
        }
        assert!("North".parse::<CompassPoint>().is_err());
    }

    #[test]
    fn test_extreme_inputs() {
        assert_eq!(CompassPoint::from_degrees(i64::MIN), CompassPoint::from_degrees(i64::MIN.rem_euclid(360)));
        assert_eq!(CompassPoint::from_bearing(f64::NAN), CompassPoint::N);
        assert_eq!(CompassPoint::from_bearing(-191.0), CompassPoint::S);
    }
}
