//! Geographic point type.

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point from latitude and longitude in degrees.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite numbers.
    ///
    /// Catalogue entries failing this check are skipped by the composer.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_finite() {
        assert!(GeoPoint::new(53.5, 10.0).is_finite());
        assert!(!GeoPoint::new(f64::NAN, 10.0).is_finite());
        assert!(!GeoPoint::new(53.5, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_from_tuple() {
        let point: GeoPoint = (40.7128, -74.0060).into();
        assert_eq!(point.latitude, 40.7128);
        assert_eq!(point.longitude, -74.0060);
    }

    #[test]
    fn test_display() {
        let point = GeoPoint::new(1.5, -2.25);
        assert_eq!(point.to_string(), "(1.500000, -2.250000)");
    }
}
