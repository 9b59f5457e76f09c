//! Size class, style token and ranking priority.
//!
//! # Priority
//!
//! ```text
//! priority = category band + distance bonus
//!
//!   RouteWaypoint  3000 ┐
//!   Deal           2000 ├─ + bonus in [0, 999], 999 at 0 m, 0 at the scale distance
//!   Venue          1000 ┘
//! ```
//!
//! The bonus never reaches the gap between bands, so a route waypoint
//! outranks every deal and venue at any distance. Within a category the
//! bonus is non-increasing in distance; equal priorities are ordered by
//! distance when ranking, so a strictly closer object never ranks below a
//! farther one of the same category.

use crate::catalogue::Category;

use super::config::SizeThresholds;
use super::element::{ColorHint, SizeClass};

/// Width of one category band.
const BAND_WIDTH: i32 = 1000;

/// Largest distance bonus; strictly below [`BAND_WIDTH`].
const MAX_DISTANCE_BONUS: f64 = 999.0;

/// Classifier output for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub size_class: SizeClass,
    pub color_hint: ColorHint,
    pub priority: i32,
}

/// Assigns size, style and priority from category and distance.
#[derive(Debug, Clone, Copy)]
pub struct SizeAndStyleClassifier {
    thresholds: SizeThresholds,
    distance_scale_meters: f64,
}

impl Default for SizeAndStyleClassifier {
    fn default() -> Self {
        Self::new(SizeThresholds::default(), 1000.0)
    }
}

impl SizeAndStyleClassifier {
    /// `distance_scale_meters` is the distance at which the bonus reaches 0.
    pub fn new(thresholds: SizeThresholds, distance_scale_meters: f64) -> Self {
        Self {
            thresholds,
            distance_scale_meters,
        }
    }

    pub fn classify(&self, category: Category, distance_meters: f64) -> Classification {
        Classification {
            size_class: self.size_class(distance_meters),
            color_hint: color_hint(category),
            priority: category_base_weight(category) + self.distance_bonus(distance_meters),
        }
    }

    pub fn size_class(&self, distance_meters: f64) -> SizeClass {
        if distance_meters < self.thresholds.large_below_meters {
            SizeClass::Large
        } else if distance_meters < self.thresholds.medium_below_meters {
            SizeClass::Medium
        } else {
            SizeClass::Small
        }
    }

    fn distance_bonus(&self, distance_meters: f64) -> i32 {
        // NaN distances get no bonus
        if distance_meters.is_nan() {
            return 0;
        }
        let scale = self.distance_scale_meters.max(f64::MIN_POSITIVE);
        let closeness = 1.0 - distance_meters.max(0.0).min(scale) / scale;
        (closeness * MAX_DISTANCE_BONUS).floor() as i32
    }
}

/// Base weight of a category, reflecting navigational urgency.
#[inline]
pub fn category_base_weight(category: Category) -> i32 {
    match category {
        Category::RouteWaypoint => 3 * BAND_WIDTH,
        Category::Deal => 2 * BAND_WIDTH,
        Category::Venue => BAND_WIDTH,
    }
}

/// Style token for a category.
#[inline]
pub fn color_hint(category: Category) -> ColorHint {
    match category {
        Category::RouteWaypoint => ColorHint::Affirmative,
        Category::Deal => ColorHint::Attention,
        Category::Venue => ColorHint::Brand,
    }
}
