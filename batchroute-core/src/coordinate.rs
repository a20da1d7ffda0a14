//! Geographic positions exchanged with the routing engine.

use geo::Coord;

/// A WGS84 position in decimal degrees.
///
/// Fields are named rather than positional: the batch format lists
/// latitude first while the engine expects longitude first, and only the
/// field names keep the two apart.
///
/// # Examples
///
/// ```
/// use batchroute_core::Coordinate;
/// use geo::Coord;
///
/// let berlin = Coordinate { latitude: 52.5, longitude: 13.4 };
/// let point: Coord = berlin.into();
/// assert_eq!(point, Coord { x: 13.4, y: 52.5 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self {
            latitude: value.y,
            longitude: value.x,
        }
    }
}
