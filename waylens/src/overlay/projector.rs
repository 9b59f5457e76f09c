//! Relative bearing and distance → viewport coordinates.
//!
//! # Mapping
//!
//! ```text
//!  x:  -fov/2 ────────── 0 ────────── +fov/2
//!       0             width/2           width
//!
//!  y:  far_band  ┬  (far objects, higher on screen)
//!                │
//!      near_band ┴  (near objects, lower on screen)
//! ```
//!
//! Horizontal placement is linear in the relative bearing. Vertical placement
//! normalizes the distance against `max_distance_for_vertical_scale`, shapes
//! it with the configured [`VerticalCurve`](super::VerticalCurve) and
//! interpolates between the two band edges.

use super::config::ProjectionConfig;
use super::element::{ScreenPosition, Viewport};

/// Smallest denominator used when normalizing.
const EPSILON: f64 = 1e-6;

/// Maps visible objects onto the screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenProjector {
    config: ProjectionConfig,
}

impl ScreenProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project one object. The result always lies inside the viewport.
    pub fn project(
        &self,
        relative_bearing_degrees: f64,
        distance_meters: f64,
        fov_degrees: f64,
        viewport: Viewport,
    ) -> ScreenPosition {
        let half_fov = fov_degrees / 2.0;
        let horizontal = (relative_bearing_degrees + half_fov) / fov_degrees.max(EPSILON);
        let x = clamp_to_extent(horizontal * viewport.width, viewport.width);

        let scale = self.config.max_distance_for_vertical_scale;
        let t = clamp_to_extent(distance_meters, scale) / scale.max(EPSILON);
        let shaped = self.config.curve.apply(t.clamp(0.0, 1.0));
        let band = self.config.near_band + (self.config.far_band - self.config.near_band) * shaped;
        let y = clamp_to_extent(band * viewport.height, viewport.height);

        ScreenPosition { x, y }
    }
}

/// Clamp into `[0, extent]` without panicking on degenerate extents.
#[inline]
fn clamp_to_extent(value: f64, extent: f64) -> f64 {
    value.max(0.0).min(extent.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::VerticalCurve;

    const VIEWPORT: Viewport = Viewport::new(1000.0, 2000.0);

    fn projector() -> ScreenProjector {
        ScreenProjector::default()
    }

    #[test]
    fn test_straight_ahead_is_centered() {
        let pos = projector().project(0.0, 100.0, 120.0, VIEWPORT);
        assert!((pos.x - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_cone_edges_map_to_viewport_edges() {
        let left = projector().project(-60.0, 100.0, 120.0, VIEWPORT);
        let right = projector().project(60.0, 100.0, 120.0, VIEWPORT);
        assert!(left.x.abs() < 1e-9);
        assert!((right.x - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_outside_cone_is_clamped() {
        let pos = projector().project(90.0, 100.0, 120.0, VIEWPORT);
        assert_eq!(pos.x, 1000.0);
    }

    #[test]
    fn test_near_is_lower_than_far() {
        let near = projector().project(0.0, 10.0, 120.0, VIEWPORT);
        let far = projector().project(0.0, 400.0, 120.0, VIEWPORT);
        assert!(near.y > far.y, "near {} should be below far {}", near.y, far.y);
    }

    #[test]
    fn test_vertical_band_endpoints() {
        let zero = projector().project(0.0, 0.0, 120.0, VIEWPORT);
        let max = projector().project(0.0, 500.0, 120.0, VIEWPORT);
        let beyond = projector().project(0.0, 5000.0, 120.0, VIEWPORT);
        assert!((zero.y - 1400.0).abs() < 1e-9);
        assert!((max.y - 600.0).abs() < 1e-9);
        assert_eq!(beyond.y, max.y);
    }

    #[test]
    fn test_zero_vertical_scale_does_not_divide_by_zero() {
        let projector = ScreenProjector::new(ProjectionConfig {
            max_distance_for_vertical_scale: 0.0,
            ..Default::default()
        });
        let pos = projector.project(0.0, 0.0, 120.0, VIEWPORT);
        assert!(pos.y.is_finite());
        assert!((pos.y - 1400.0).abs() < 1e-9);
    }

    #[test]
    fn test_ease_out_lifts_midrange() {
        let eased = ScreenProjector::new(ProjectionConfig {
            curve: VerticalCurve::EaseOut,
            ..Default::default()
        });
        let linear = projector().project(0.0, 125.0, 120.0, VIEWPORT);
        let curved = eased.project(0.0, 125.0, 120.0, VIEWPORT);
        assert!(curved.y < linear.y);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_projection_stays_on_canvas(
                rel in -180.0..180.0_f64,
                distance in 0.0..10_000.0_f64,
                fov in 1.0..360.0_f64,
                width in 0.0..4000.0_f64,
                height in 0.0..4000.0_f64,
            ) {
                let pos = projector().project(rel, distance, fov, Viewport::new(width, height));
                prop_assert!(pos.x >= 0.0 && pos.x <= width);
                prop_assert!(pos.y >= 0.0 && pos.y <= height);
            }

            #[test]
            fn test_vertical_monotonic(a in 0.0..1000.0_f64, b in 0.0..1000.0_f64) {
                let (near, far) = if a <= b { (a, b) } else { (b, a) };
                let near_pos = projector().project(0.0, near, 120.0, VIEWPORT);
                let far_pos = projector().project(0.0, far, 120.0, VIEWPORT);
                prop_assert!(near_pos.y >= far_pos.y);
            }
        }
    }
}
