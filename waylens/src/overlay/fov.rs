//! Field-of-view and range culling.
//!
//! Runs before projection so that screen-space work and ranking only ever see
//! objects that can actually appear in the frame.

use crate::geo::{bearing_degrees, distance_meters, normalize_relative_bearing, GeoPoint};
use crate::pose::Pose;

/// Distance and relative bearing of an object that passed culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub distance_meters: f64,
    /// `[-180, 180)`, 0 = straight ahead.
    pub relative_bearing_degrees: f64,
}

/// Why an object was culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Culled {
    /// Beyond the category's max range.
    OutOfRange,
    /// Outside the horizontal viewing cone.
    OutsideFieldOfView,
}

/// Decide whether `target` is visible from `pose`.
///
/// Range is checked first so bearings are only computed for nearby objects.
/// A NaN distance is treated as out of range.
pub fn classify_visibility(
    pose: &Pose,
    target: GeoPoint,
    fov_degrees: f64,
    max_range_meters: f64,
) -> Result<Visibility, Culled> {
    let distance = distance_meters(pose.position, target);
    if !(distance <= max_range_meters) {
        return Err(Culled::OutOfRange);
    }

    let absolute = bearing_degrees(pose.position, target);
    let relative = normalize_relative_bearing(absolute - pose.heading_degrees);
    if relative.abs() > fov_degrees / 2.0 {
        return Err(Culled::OutsideFieldOfView);
    }

    Ok(Visibility {
        distance_meters: distance,
        relative_bearing_degrees: relative,
    })
}

/// [`classify_visibility`] without the cull reason.
#[inline]
pub fn is_visible(
    pose: &Pose,
    target: GeoPoint,
    fov_degrees: f64,
    max_range_meters: f64,
) -> Option<Visibility> {
    classify_visibility(pose, target, fov_degrees, max_range_meters).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(heading: f64) -> Pose {
        Pose::new(GeoPoint::new(0.0, 0.0), heading)
    }

    #[test]
    fn test_object_ahead_is_visible() {
        let vis = is_visible(&pose(0.0), GeoPoint::new(0.001, 0.0), 120.0, 500.0).unwrap();
        assert!(vis.relative_bearing_degrees.abs() < 1e-9);
        assert!((vis.distance_meters - 111.19).abs() < 0.1);
    }

    #[test]
    fn test_object_to_the_east_outside_cone() {
        let result = classify_visibility(&pose(0.0), GeoPoint::new(0.0, 0.001), 120.0, 500.0);
        assert_eq!(result, Err(Culled::OutsideFieldOfView));
    }

    #[test]
    fn test_object_to_the_east_visible_when_facing_east() {
        let vis = is_visible(&pose(90.0), GeoPoint::new(0.0, 0.001), 120.0, 500.0).unwrap();
        assert!(vis.relative_bearing_degrees.abs() < 1e-6);
    }

    #[test]
    fn test_object_left_has_negative_bearing() {
        // Facing north-east, an object due north is 45 degrees to the left
        let vis = is_visible(&pose(45.0), GeoPoint::new(0.001, 0.0), 120.0, 500.0).unwrap();
        assert!((vis.relative_bearing_degrees + 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_wraparound() {
        // Facing 350, object at bearing 10 is 20 degrees to the right
        let target = GeoPoint::new(
            0.001 * 10f64.to_radians().cos(),
            0.001 * 10f64.to_radians().sin(),
        );
        let vis = is_visible(&pose(350.0), target, 120.0, 500.0).unwrap();
        assert!((vis.relative_bearing_degrees - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_far_object_out_of_range() {
        let result = classify_visibility(&pose(0.0), GeoPoint::new(0.01, 0.0), 120.0, 500.0);
        assert_eq!(result, Err(Culled::OutOfRange));
    }

    #[test]
    fn test_nan_target_out_of_range() {
        let result = classify_visibility(&pose(0.0), GeoPoint::new(f64::NAN, 0.0), 120.0, 500.0);
        assert_eq!(result, Err(Culled::OutOfRange));
    }

    #[test]
    fn test_full_circle_fov_accepts_behind() {
        assert!(is_visible(&pose(0.0), GeoPoint::new(-0.001, 0.0), 360.0, 500.0).is_some());
    }
}
