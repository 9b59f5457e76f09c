//! Per-frame overlay composition.
//!
//! [`OverlayComposer::compose`] turns a pose and a catalogue into the ordered
//! element list for one frame.
//!
//! # Algorithm
//!
//! 1. Resolve the performance budget once for the whole frame.
//! 2. Pre-limit each category to its candidate cap (highest base priority
//!    first) before any geodesic work.
//! 3. Cull by per-category range and field of view.
//! 4. Project and classify the survivors.
//! 5. Reserve the nearest route waypoints, which are exempt from the budget.
//! 6. Rank everything else by priority (desc), then distance (asc).
//! 7. Fill the remaining budget and return the merged, ranked list.
//!
//! Malformed objects are skipped with a warning; they never fail a frame.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::catalogue::{Catalogue, Category, WorldObject};
use crate::config::ConfigError;
use crate::performance::{PerformanceBudget, PerformanceMode};
use crate::pose::{Pose, PoseReading};
use crate::telemetry::FrameStats;

use super::classifier::SizeAndStyleClassifier;
use super::config::{CategoryConfig, OverlayConfig};
use super::element::{ArElement, Viewport};
use super::fov::classify_visibility;
use super::projector::ScreenProjector;

/// Elements and statistics for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedFrame {
    /// Ranked elements, at most the budget's `max_elements`.
    pub elements: Vec<ArElement>,
    pub stats: FrameStats,
}

/// An element plus the catalogue data used only for tie-breaking.
#[derive(Debug)]
struct Candidate {
    element: ArElement,
    base_priority: i32,
}

/// Stateless per-frame composer.
#[derive(Debug, Clone)]
pub struct OverlayComposer {
    config: OverlayConfig,
    projector: ScreenProjector,
    classifier: SizeAndStyleClassifier,
}

impl OverlayComposer {
    /// Build a composer, validating the configuration.
    pub fn new(config: OverlayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            projector: ScreenProjector::new(config.projection),
            classifier: SizeAndStyleClassifier::new(
                config.size,
                config.priority_distance_scale_meters,
            ),
            config,
        })
    }

    /// Composer with the default configuration.
    pub fn with_defaults() -> Self {
        let config = OverlayConfig::default();
        Self {
            projector: ScreenProjector::new(config.projection),
            classifier: SizeAndStyleClassifier::new(
                config.size,
                config.priority_distance_scale_meters,
            ),
            config,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Budget for a mode, so the host loop can throttle its tick rate.
    pub fn settings_for(&self, mode: PerformanceMode) -> PerformanceBudget {
        self.config.budgets.settings_for(mode)
    }

    /// Ordered elements for one frame.
    pub fn compose(
        &self,
        pose: &Pose,
        catalogue: &Catalogue,
        mode: PerformanceMode,
        viewport: Viewport,
    ) -> Vec<ArElement> {
        self.compose_frame(pose, catalogue, mode, viewport).elements
    }

    /// Like [`compose`](Self::compose), with an unavailable pose yielding an
    /// empty frame.
    pub fn compose_reading(
        &self,
        reading: PoseReading,
        catalogue: &Catalogue,
        mode: PerformanceMode,
        viewport: Viewport,
    ) -> ComposedFrame {
        match reading {
            PoseReading::Available(pose) => self.compose_frame(&pose, catalogue, mode, viewport),
            PoseReading::Unavailable => self.empty_frame(mode),
        }
    }

    /// Empty frame for when no pose is available.
    pub fn empty_frame(&self, mode: PerformanceMode) -> ComposedFrame {
        ComposedFrame {
            elements: Vec::new(),
            stats: FrameStats::without_pose(mode, self.settings_for(mode)),
        }
    }

    /// Ordered elements plus frame statistics.
    pub fn compose_frame(
        &self,
        pose: &Pose,
        catalogue: &Catalogue,
        mode: PerformanceMode,
        viewport: Viewport,
    ) -> ComposedFrame {
        let budget = self.settings_for(mode);
        let mut stats = FrameStats::new(mode, budget);
        stats.candidates = catalogue.len();

        if !pose.is_finite() {
            warn!(?pose, "Pose has non-finite values, emitting empty frame");
            return self.empty_frame(mode);
        }
        if !viewport.is_valid() {
            warn!(?viewport, "Invalid viewport, emitting empty frame");
            return ComposedFrame {
                elements: Vec::new(),
                stats,
            };
        }

        let mut waypoints = Vec::new();
        let mut others = Vec::new();

        for bucket in Category::ALL {
            let objects = catalogue.objects(bucket);
            let limit = self.config.category(bucket).max_candidates;
            let selected = pre_limit(objects, limit);
            stats.pre_limited += objects.len() - selected.len();

            for object in selected {
                let Some(candidate) = self.build_candidate(pose, object, viewport, &mut stats)
                else {
                    continue;
                };
                match candidate.element.category {
                    Category::RouteWaypoint => waypoints.push(candidate),
                    Category::Venue | Category::Deal => others.push(candidate),
                }
            }
        }
        stats.visible = waypoints.len() + others.len();

        // Nearest waypoints are guaranteed a slot; the rest compete normally
        waypoints.sort_by(nearest_first);
        let reserved_count = waypoints.len().min(self.config.route_waypoint_cap);
        let mut ranked: Vec<Candidate> = waypoints.drain(..reserved_count).collect();
        others.append(&mut waypoints);
        stats.reserved_waypoints = ranked.len();

        others.sort_by(rank_order);
        let remaining = budget.max_elements.saturating_sub(ranked.len());
        others.truncate(remaining);

        ranked.append(&mut others);
        // Validation keeps the waypoint cap within every budget, so the total
        // never exceeds max_elements.
        ranked.sort_by(rank_order);

        stats.emitted = ranked.len();
        stats.truncated = stats.visible - stats.emitted;

        debug!(
            mode = %mode,
            candidates = stats.candidates,
            visible = stats.visible,
            reserved = stats.reserved_waypoints,
            emitted = stats.emitted,
            "Composed overlay frame"
        );

        ComposedFrame {
            elements: ranked.into_iter().map(|c| c.element).collect(),
            stats,
        }
    }

    fn build_candidate(
        &self,
        pose: &Pose,
        object: &WorldObject,
        viewport: Viewport,
        stats: &mut FrameStats,
    ) -> Option<Candidate> {
        if !object.position.is_finite() {
            warn!(
                id = %object.id,
                category = %object.category,
                position = %object.position,
                "Skipping world object with non-finite coordinates"
            );
            stats.malformed += 1;
            return None;
        }

        let CategoryConfig {
            fov_degrees,
            max_range_meters,
            ..
        } = *self.config.category(object.category);

        let visibility =
            match classify_visibility(pose, object.position, fov_degrees, max_range_meters) {
                Ok(visibility) => visibility,
                Err(reason) => {
                    stats.record_cull(reason);
                    return None;
                }
            };

        let screen_position = self.projector.project(
            visibility.relative_bearing_degrees,
            visibility.distance_meters,
            fov_degrees,
            viewport,
        );
        let class = self
            .classifier
            .classify(object.category, visibility.distance_meters);

        Some(Candidate {
            element: ArElement {
                id: object.id.clone(),
                category: object.category,
                screen_position,
                distance_meters: visibility.distance_meters,
                relative_bearing_degrees: visibility.relative_bearing_degrees,
                size_class: class.size_class,
                priority: class.priority,
                color_hint: class.color_hint,
                label: object.label.clone(),
                description: object.description.clone(),
            },
            base_priority: object.base_priority,
        })
    }
}

impl Default for OverlayComposer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Keep at most `limit` objects, preferring higher base priority.
///
/// Catalogue order is preserved among equal base priorities.
fn pre_limit(objects: &[WorldObject], limit: usize) -> Vec<&WorldObject> {
    let mut selected: Vec<&WorldObject> = objects.iter().collect();
    if selected.len() > limit {
        selected.sort_by(|a, b| b.base_priority.cmp(&a.base_priority));
        selected.truncate(limit);
    }
    selected
}

/// Priority descending, distance ascending, then base priority and id.
fn rank_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.element
        .priority
        .cmp(&a.element.priority)
        .then_with(|| {
            a.element
                .distance_meters
                .total_cmp(&b.element.distance_meters)
        })
        .then_with(|| b.base_priority.cmp(&a.base_priority))
        .then_with(|| a.element.id.cmp(&b.element.id))
}

fn nearest_first(a: &Candidate, b: &Candidate) -> Ordering {
    a.element
        .distance_meters
        .total_cmp(&b.element.distance_meters)
        .then_with(|| a.element.id.cmp(&b.element.id))
}
