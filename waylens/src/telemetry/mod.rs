//! Overlay telemetry for observability and tuning.
//!
//! Each composed frame produces a [`FrameStats`] describing what happened to
//! its candidates. [`OverlayMetrics`] accumulates those across frames with
//! lock-free atomic counters so the host UI can read them from any thread.
//!
//! # Architecture
//!
//! ```text
//! OverlayComposer ──► FrameStats ──► OverlayMetrics ──► MetricsSnapshot ──► Views
//!                    (per frame)    (atomic counters)   (point-in-time copy)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use waylens::telemetry::OverlayMetrics;
//!
//! let metrics = Arc::new(OverlayMetrics::new());
//! metrics.record_frame(&frame.stats);
//!
//! let snapshot = metrics.snapshot();
//! println!("Frames composed: {}", snapshot.frames_composed);
//! ```

mod frame;
mod metrics;
mod snapshot;

pub use frame::FrameStats;
pub use metrics::OverlayMetrics;
pub use snapshot::MetricsSnapshot;
