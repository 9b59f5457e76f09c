//! Great-circle geometry on a spherical Earth.
//!
//! Provides the distance and bearing primitives the overlay engine builds on.
//! All angles are in degrees; bearings are measured clockwise from north.

mod point;

pub use point::GeoPoint;

/// Mean Earth radius in meters used for haversine distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (haversine formula).
///
/// Inputs are not validated. NaN coordinates propagate to a NaN result, so
/// callers must filter malformed points upstream.
#[inline]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push h marginally above 1 for antipodal points
    let c = 2.0 * h.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_METERS * c
}

/// Initial compass bearing from `from` to `to`, in degrees `[0, 360)`.
///
/// 0 = North, 90 = East. Coincident points yield 0.
#[inline]
pub fn bearing_degrees(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let x = delta_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    normalize_bearing(x.atan2(y).to_degrees())
}

/// Normalize any angle into the compass range `[0, 360)`.
#[inline]
pub fn normalize_bearing(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Normalize an angle difference into `[-180, 180)`.
///
/// 0 means straight ahead, negative values are to the left.
#[inline]
pub fn normalize_relative_bearing(degrees: f64) -> f64 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped >= 180.0 {
        -180.0
    } else {
        wrapped
    }
}
