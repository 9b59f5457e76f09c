//! AR spatial overlay pipeline.
//!
//! Converts a pose and a catalogue of world objects into the ranked,
//! screen-annotated element list the renderer draws each frame.
//!
//! # Module Structure
//!
//! ```text
//! overlay/
//! ├── mod.rs          # This file - module exports
//! ├── config.rs       # Per-category cone/range, sizes, projection
//! ├── element.rs      # ArElement, Viewport, SizeClass, ColorHint
//! ├── fov.rs          # Field-of-view and range culling
//! ├── projector.rs    # Bearing/distance → screen position
//! ├── classifier.rs   # Size class, style token, priority
//! ├── composer.rs     # Per-frame orchestration
//! └── engine.rs       # Render-loop facade over pose/catalogue sources
//! ```
//!
//! # Example Usage
//!
//! ```ignore
//! use waylens::overlay::{OverlayComposer, Viewport};
//! use waylens::performance::PerformanceMode;
//!
//! let composer = OverlayComposer::new(config)?;
//! let elements = composer.compose(&pose, &catalogue, PerformanceMode::Balanced, Viewport::new(1080.0, 1920.0));
//! ```

mod classifier;
mod composer;
mod config;
mod element;
mod engine;
mod fov;
mod projector;

pub use classifier::{category_base_weight, color_hint, Classification, SizeAndStyleClassifier};
pub use composer::{ComposedFrame, OverlayComposer};
pub use config::{
    CategoryConfig, OverlayConfig, ProjectionConfig, SizeThresholds, VerticalCurve,
    DEFAULT_FOV_DEGREES, DEFAULT_ROUTE_WAYPOINT_CAP,
};
pub use element::{ArElement, ColorHint, ScreenPosition, SizeClass, Viewport};
pub use engine::OverlayEngine;
pub use fov::{classify_visibility, is_visible, Culled, Visibility};
pub use projector::ScreenProjector;
