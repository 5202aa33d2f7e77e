//! Fixed-point coordinates and the small set of geometric primitives the rest of the crate needs.
//!
//! Coordinates are stored 1e6-scaled, matching the fixed-point representation the contracted-
//! hierarchy graph and geometry arrays use everywhere they carry a `Coordinate`
//! (`examples/original_source/include/engine/phantom_node.hpp`'s `location`/`input_location`
//! fields; the header that defines the type itself, `util/coordinate.hpp`, was not part of the
//! retrieved original-source pack), rather than the floating-point `Pt2D` the teacher crate uses
//! for a Mercator-projected map -- this crate's coordinates are WGS84 lon/lat, not projected.

use geo::algorithm::haversine_distance::HaversineDistance;
use geo::Point;

const COORDINATE_PRECISION: f64 = 1_000_000.0;

/// A WGS84 longitude/latitude pair, stored as 1e6-scaled fixed point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    pub lon: i32,
    pub lat: i32,
}

impl Coordinate {
    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Coordinate {
            lon: (lon * COORDINATE_PRECISION).round() as i32,
            lat: (lat * COORDINATE_PRECISION).round() as i32,
        }
    }

    pub fn lon_degrees(&self) -> f64 {
        self.lon as f64 / COORDINATE_PRECISION
    }

    pub fn lat_degrees(&self) -> f64 {
        self.lat as f64 / COORDINATE_PRECISION
    }

    fn as_point(&self) -> Point<f64> {
        Point::new(self.lon_degrees(), self.lat_degrees())
    }

    /// Great-circle distance in meters.
    pub fn haversine_distance(&self, other: &Coordinate) -> f64 {
        self.as_point().haversine_distance(&other.as_point())
    }

    /// Initial bearing, in degrees `[0, 360)`, of the great-circle path from `self` to `other`.
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat_degrees().to_radians();
        let lat2 = other.lat_degrees().to_radians();
        let delta_lon = (other.lon_degrees() - self.lon_degrees()).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
        let theta = y.atan2(x).to_degrees();
        (theta + 360.0) % 360.0
    }
}

/// Reverses a bearing (the bearing one would observe travelling the opposite direction).
pub fn reverse_bearing(bearing: f64) -> f64 {
    (bearing + 180.0) % 360.0
}

/// Smallest absolute angle between two bearings, in `[0, 180]`.
pub fn angular_deviation(lhs: f64, rhs: f64) -> f64 {
    let diff = (lhs - rhs).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// `true` iff `b1` and `b2` point in (approximately) opposite directions, within `tolerance`
/// degrees. Used to detect U-turn geometry (Testable Property 8).
pub fn bearings_are_reversed(b1: f64, b2: f64, tolerance: f64) -> bool {
    (angular_deviation(b1, reverse_bearing(b2))).abs() <= tolerance
}

/// The turn angle `[0, 360)` swept between arriving on bearing `before` and leaving on bearing
/// `after`, with 180 meaning straight ahead and 0/360 a full U-turn. Used to derive a
/// `DirectionModifier` for a merged pair of steps (§4.E.2, §4.G.6).
pub fn turn_angle(before: f64, after: f64) -> f64 {
    (after - reverse_bearing(before)).rem_euclid(360.0)
}

/// `true` iff a turn angle (as returned by [`turn_angle`]) is within `tolerance` degrees of a
/// full U-turn (0/360).
pub fn is_near_uturn_angle(angle: f64, tolerance: f64) -> bool {
    angle <= tolerance || angle >= 360.0 - tolerance
}

/// Average a set of bearings via atan2 of the summed unit vectors, so wraparound near 0/360
/// degrees behaves correctly. Used when merging dual-carriageway bearings (§4.E.2).
pub fn average_bearings(bearings: &[f64]) -> f64 {
    let (mut sin_sum, mut cos_sum) = (0.0, 0.0);
    for b in bearings {
        let rad = b.to_radians();
        sin_sum += rad.sin();
        cos_sum += rad.cos();
    }
    let avg = sin_sum.atan2(cos_sum).to_degrees();
    (avg + 360.0) % 360.0
}
