//! World objects the overlay can annotate.
//!
//! The catalogue is owned and refreshed by an external source; the engine
//! only reads it for the duration of a frame.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::pose::Pose;

/// Kind of world object.
///
/// Ordering of variants carries no meaning; ranking is decided by the
/// classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Ambient point of interest (shop, venue, amenity).
    Venue,
    /// Waypoint on the user's active route.
    RouteWaypoint,
    /// Promotional deal marker.
    Deal,
}

impl Category {
    /// All categories, in catalogue order.
    pub const ALL: [Category; 3] = [Category::Venue, Category::RouteWaypoint, Category::Deal];

    /// Short name used in logs and config sections.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Venue => "venue",
            Category::RouteWaypoint => "route",
            Category::Deal => "deal",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Anything the overlay may annotate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    /// Unique identifier, mirrored into the emitted element.
    pub id: String,
    pub category: Category,
    pub position: GeoPoint,
    /// Display label.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Catalogue-assigned priority nudge within the category.
    #[serde(default)]
    pub base_priority: i32,
}

impl WorldObject {
    /// Create an object with no description and zero base priority.
    pub fn new(
        id: impl Into<String>,
        category: Category,
        position: GeoPoint,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            position,
            label: label.into(),
            description: None,
            base_priority: 0,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the base priority.
    pub fn with_base_priority(mut self, base_priority: i32) -> Self {
        self.base_priority = base_priority;
        self
    }
}

/// Candidate objects for one frame, bucketed by category.
///
/// Lists may be pre-sorted by distance; the composer does not rely on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    pub venues: Vec<WorldObject>,
    #[serde(default)]
    pub route_waypoints: Vec<WorldObject>,
    #[serde(default)]
    pub deals: Vec<WorldObject>,
}

impl Catalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket a mixed list of objects by their category.
    pub fn from_objects(objects: impl IntoIterator<Item = WorldObject>) -> Self {
        let mut catalogue = Self::default();
        for object in objects {
            catalogue.push(object);
        }
        catalogue
    }

    /// Add an object to the bucket matching its category.
    pub fn push(&mut self, object: WorldObject) {
        match object.category {
            Category::Venue => self.venues.push(object),
            Category::RouteWaypoint => self.route_waypoints.push(object),
            Category::Deal => self.deals.push(object),
        }
    }

    /// Objects of one category.
    pub fn objects(&self, category: Category) -> &[WorldObject] {
        match category {
            Category::Venue => &self.venues,
            Category::RouteWaypoint => &self.route_waypoints,
            Category::Deal => &self.deals,
        }
    }

    /// Total number of objects across all categories.
    pub fn len(&self) -> usize {
        self.venues.len() + self.route_waypoints.len() + self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Supplier of world objects around a pose.
///
/// Implementations are refreshed independently of the overlay engine and
/// must answer synchronously.
pub trait CatalogueSource: Send + Sync {
    /// Candidate objects near `pose`.
    fn catalogue(&self, pose: &Pose) -> Catalogue;
}

/// A fixed catalogue, returned unchanged for every pose.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogue {
    catalogue: Catalogue,
}

impl StaticCatalogue {
    pub fn new(catalogue: Catalogue) -> Self {
        Self { catalogue }
    }
}

impl CatalogueSource for StaticCatalogue {
    fn catalogue(&self, _pose: &Pose) -> Catalogue {
        self.catalogue.clone()
    }
}
