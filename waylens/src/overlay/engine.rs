//! Render-loop facade over the composer.
//!
//! Binds a pose source, a catalogue source and the shared performance mode to
//! an [`OverlayComposer`]. The host loop calls [`OverlayEngine::tick`] once per
//! frame and sleeps for [`OverlayEngine::frame_interval`] between ticks.
//!
//! # Example
//!
//! ```ignore
//! let engine = OverlayEngine::new(composer, pose_tracker, catalogue_source, mode);
//!
//! loop {
//!     let frame = engine.tick(viewport);
//!     renderer.draw(&frame.elements);
//!     std::thread::sleep(engine.frame_interval());
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::catalogue::CatalogueSource;
use crate::performance::{PerformanceBudget, SharedPerformanceMode};
use crate::pose::{PoseReading, PoseSource};
use crate::telemetry::{MetricsSnapshot, OverlayMetrics};

use super::composer::{ComposedFrame, OverlayComposer};
use super::element::Viewport;

/// Per-frame driver for the host render loop.
pub struct OverlayEngine {
    composer: OverlayComposer,
    pose_source: Arc<dyn PoseSource>,
    catalogue_source: Arc<dyn CatalogueSource>,
    mode: Arc<SharedPerformanceMode>,
    metrics: Arc<OverlayMetrics>,
}

impl OverlayEngine {
    pub fn new(
        composer: OverlayComposer,
        pose_source: Arc<dyn PoseSource>,
        catalogue_source: Arc<dyn CatalogueSource>,
        mode: Arc<SharedPerformanceMode>,
    ) -> Self {
        Self {
            composer,
            pose_source,
            catalogue_source,
            mode,
            metrics: Arc::new(OverlayMetrics::new()),
        }
    }

    /// Compose the next frame.
    ///
    /// The performance mode is read once on entry; a concurrent mode change
    /// only affects the following tick. Without a pose the catalogue is not
    /// queried and the frame is empty.
    pub fn tick(&self, viewport: Viewport) -> ComposedFrame {
        let mode = self.mode.get();

        let frame = match self.pose_source.current_pose() {
            PoseReading::Available(pose) => {
                let catalogue = self.catalogue_source.catalogue(&pose);
                self.composer.compose_frame(&pose, &catalogue, mode, viewport)
            }
            PoseReading::Unavailable => {
                tracing::trace!("No pose available, emitting empty frame");
                self.composer.empty_frame(mode)
            }
        };

        self.metrics.record_frame(&frame.stats);
        frame
    }

    /// Budget for the currently selected mode.
    pub fn current_budget(&self) -> PerformanceBudget {
        self.composer.settings_for(self.mode.get())
    }

    /// Time between ticks at the current mode's target rate.
    pub fn frame_interval(&self) -> Duration {
        self.current_budget().frame_interval()
    }

    pub fn composer(&self) -> &OverlayComposer {
        &self.composer
    }

    pub fn mode(&self) -> &Arc<SharedPerformanceMode> {
        &self.mode
    }

    /// Shared handle to the cumulative metrics.
    pub fn metrics(&self) -> Arc<OverlayMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
