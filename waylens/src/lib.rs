//! Waylens - AR spatial overlay engine for venue navigation
//!
//! Takes the user's position and compass heading, a catalogue of venues,
//! route waypoints and deal markers, and a device viewport, and produces the
//! prioritized, screen-positioned element list to draw each frame under a
//! field-of-view and performance budget.
//!
//! ```text
//! PoseSource ──► Pose ─┐
//!                      ├─► OverlayComposer ──► Vec<ArElement> ──► renderer
//! CatalogueSource ─────┘        ▲
//!                               └── PerformanceMode (read once per frame)
//! ```

pub mod catalogue;
pub mod config;
pub mod geo;
pub mod logging;
pub mod overlay;
pub mod performance;
pub mod pose;
pub mod telemetry;

pub use catalogue::{Catalogue, CatalogueSource, Category, WorldObject};
pub use geo::GeoPoint;
pub use overlay::{ArElement, OverlayComposer, OverlayConfig, OverlayEngine, Viewport};
pub use performance::{PerformanceBudget, PerformanceMode, PerformanceModeController};
pub use pose::{Pose, PoseReading, PoseSource, PoseTracker};
