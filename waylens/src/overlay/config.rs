//! Configuration for the overlay pipeline.
//!
//! Groups the recognised tuning surface:
//!
//! - **Per-category cone and range**: field of view, max range and
//!   candidate pre-limit for venues, route waypoints and deals
//! - **Size thresholds**: distances at which elements shrink
//! - **Projection**: vertical band and curve for distance-based placement
//! - **Budgets**: performance mode → frame rate and element cap
//!
//! All values are validated once in [`OverlayConfig::validate`]; a composer
//! is never built from an invalid configuration.

use serde::{Deserialize, Serialize};

use crate::catalogue::Category;
use crate::config::ConfigError;
use crate::performance::PerformanceModeController;

/// Default horizontal field of view (degrees).
pub const DEFAULT_FOV_DEGREES: f64 = 120.0;

/// Default number of nearest route waypoints exempt from the element budget.
pub const DEFAULT_ROUTE_WAYPOINT_CAP: usize = 3;

/// Cone, range and pre-limit for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Full horizontal field of view in degrees, centered on the heading.
    pub fov_degrees: f64,

    /// Objects farther than this are culled.
    pub max_range_meters: f64,

    /// Objects considered per frame before any geodesic work.
    ///
    /// Bounds per-frame cost on very large catalogues.
    pub max_candidates: usize,
}

impl CategoryConfig {
    pub const fn new(fov_degrees: f64, max_range_meters: f64, max_candidates: usize) -> Self {
        Self {
            fov_degrees,
            max_range_meters,
            max_candidates,
        }
    }

    fn validate(&self, category: Category) -> Result<(), ConfigError> {
        let key = |field: &str| format!("overlay.{}.{}", category, field);

        if !self.fov_degrees.is_finite() || self.fov_degrees <= 0.0 || self.fov_degrees > 360.0 {
            return Err(ConfigError::invalid(
                key("fov_degrees"),
                format!("{} is not in (0, 360]", self.fov_degrees),
            ));
        }
        if !self.max_range_meters.is_finite() || self.max_range_meters <= 0.0 {
            return Err(ConfigError::invalid(
                key("max_range_meters"),
                format!("{} is not a positive finite distance", self.max_range_meters),
            ));
        }
        Ok(())
    }
}

/// Distance thresholds for element size classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeThresholds {
    /// Closer than this renders Large.
    pub large_below_meters: f64,
    /// Closer than this (and not Large) renders Medium; otherwise Small.
    pub medium_below_meters: f64,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            large_below_meters: 50.0,
            medium_below_meters: 150.0,
        }
    }
}

impl SizeThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.large_below_meters.is_finite() || self.large_below_meters < 0.0 {
            return Err(ConfigError::invalid(
                "overlay.size.large_below_meters",
                "must be a non-negative finite distance",
            ));
        }
        if !self.medium_below_meters.is_finite()
            || self.medium_below_meters < self.large_below_meters
        {
            return Err(ConfigError::invalid(
                "overlay.size.medium_below_meters",
                "must be finite and not below large_below_meters",
            ));
        }
        Ok(())
    }
}

/// Shape of the distance → vertical position mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalCurve {
    /// Straight interpolation between the near and far band edges.
    #[default]
    Linear,
    /// Square-root easing: nearby distance changes move elements more.
    EaseOut,
}

impl VerticalCurve {
    /// Apply the curve to a normalized distance in `[0, 1]`.
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            VerticalCurve::Linear => t,
            VerticalCurve::EaseOut => t.sqrt(),
        }
    }
}

impl std::fmt::Display for VerticalCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerticalCurve::Linear => write!(f, "linear"),
            VerticalCurve::EaseOut => write!(f, "ease_out"),
        }
    }
}

impl std::str::FromStr for VerticalCurve {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "ease_out" | "easeout" => Ok(Self::EaseOut),
            other => Err(ConfigError::invalid(
                "overlay.projection.curve",
                format!("unknown curve '{}'", other),
            )),
        }
    }
}

/// Vertical placement parameters for the screen projector.
///
/// Band edges are fractions of viewport height measured from the top.
/// Near objects sit at `near_band`, far objects at `far_band`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub near_band: f64,
    pub far_band: f64,
    /// Distances are clamped to this before normalizing.
    pub max_distance_for_vertical_scale: f64,
    pub curve: VerticalCurve,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            near_band: 0.7,
            far_band: 0.3,
            max_distance_for_vertical_scale: 500.0,
            curve: VerticalCurve::Linear,
        }
    }
}

impl ProjectionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("overlay.projection.near_band", self.near_band),
            ("overlay.projection.far_band", self.far_band),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(key, format!("{} is not in [0, 1]", value)));
            }
        }
        if self.near_band < self.far_band {
            return Err(ConfigError::invalid(
                "overlay.projection.near_band",
                "near band must be at or below the far band on screen",
            ));
        }
        if !self.max_distance_for_vertical_scale.is_finite()
            || self.max_distance_for_vertical_scale < 0.0
        {
            return Err(ConfigError::invalid(
                "overlay.projection.max_distance_for_vertical_scale",
                "must be a non-negative finite distance",
            ));
        }
        Ok(())
    }
}

/// Complete overlay configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub venue: CategoryConfig,
    pub route: CategoryConfig,
    pub deal: CategoryConfig,

    pub size: SizeThresholds,

    pub projection: ProjectionConfig,

    /// Distance over which the priority distance bonus decays to zero.
    pub priority_distance_scale_meters: f64,

    /// Nearest route waypoints always emitted regardless of budget.
    ///
    /// Must not exceed the smallest element budget.
    pub route_waypoint_cap: usize,

    pub budgets: PerformanceModeController,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            venue: CategoryConfig::new(DEFAULT_FOV_DEGREES, 500.0, 100),
            route: CategoryConfig::new(DEFAULT_FOV_DEGREES, 1000.0, 20),
            deal: CategoryConfig::new(DEFAULT_FOV_DEGREES, 300.0, 50),
            size: SizeThresholds::default(),
            projection: ProjectionConfig::default(),
            priority_distance_scale_meters: 1000.0,
            route_waypoint_cap: DEFAULT_ROUTE_WAYPOINT_CAP,
            budgets: PerformanceModeController::default(),
        }
    }
}

impl OverlayConfig {
    /// Settings for one category.
    #[inline]
    pub fn category(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::Venue => &self.venue,
            Category::RouteWaypoint => &self.route,
            Category::Deal => &self.deal,
        }
    }

    /// Mutable settings for one category.
    pub fn category_mut(&mut self, category: Category) -> &mut CategoryConfig {
        match category {
            Category::Venue => &mut self.venue,
            Category::RouteWaypoint => &mut self.route,
            Category::Deal => &mut self.deal,
        }
    }

    /// Check every value; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in Category::ALL {
            self.category(category).validate(category)?;
        }
        self.size.validate()?;
        self.projection.validate()?;

        if !self.priority_distance_scale_meters.is_finite()
            || self.priority_distance_scale_meters <= 0.0
        {
            return Err(ConfigError::invalid(
                "overlay.priority_distance_scale_meters",
                "must be a positive finite distance",
            ));
        }

        let smallest_budget = self.budgets.min_max_elements();
        if self.route_waypoint_cap > smallest_budget {
            return Err(ConfigError::invalid(
                "overlay.route_waypoint_cap",
                format!(
                    "{} exceeds the smallest element budget ({})",
                    self.route_waypoint_cap, smallest_budget
                ),
            ));
        }
        Ok(())
    }
}
