//! Cumulative overlay metrics with atomic counters.

use std::sync::atomic::{AtomicU64, Ordering};

use super::frame::FrameStats;
use super::snapshot::MetricsSnapshot;

/// Counters accumulated across frames.
///
/// All updates use relaxed ordering; counters are independent and only read
/// as a point-in-time snapshot.
#[derive(Debug, Default)]
pub struct OverlayMetrics {
    frames_composed: AtomicU64,
    frames_without_pose: AtomicU64,
    candidates: AtomicU64,
    malformed_skipped: AtomicU64,
    culled: AtomicU64,
    truncated: AtomicU64,
    elements_emitted: AtomicU64,
}

impl OverlayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame's stats into the totals.
    pub fn record_frame(&self, stats: &FrameStats) {
        self.frames_composed.fetch_add(1, Ordering::Relaxed);
        if !stats.pose_available {
            self.frames_without_pose.fetch_add(1, Ordering::Relaxed);
        }
        self.candidates
            .fetch_add(stats.candidates as u64, Ordering::Relaxed);
        self.malformed_skipped
            .fetch_add(stats.malformed as u64, Ordering::Relaxed);
        self.culled
            .fetch_add(stats.culled() as u64, Ordering::Relaxed);
        self.truncated
            .fetch_add(stats.truncated as u64, Ordering::Relaxed);
        self.elements_emitted
            .fetch_add(stats.emitted as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_composed: self.frames_composed.load(Ordering::Relaxed),
            frames_without_pose: self.frames_without_pose.load(Ordering::Relaxed),
            candidates: self.candidates.load(Ordering::Relaxed),
            malformed_skipped: self.malformed_skipped.load(Ordering::Relaxed),
            culled: self.culled.load(Ordering::Relaxed),
            truncated: self.truncated.load(Ordering::Relaxed),
            elements_emitted: self.elements_emitted.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::{PerformanceBudget, PerformanceMode};

    #[test]
    fn test_record_frames() {
        let metrics = OverlayMetrics::new();
        let budget = PerformanceBudget::new(30, 10);

        let mut stats = FrameStats::new(PerformanceMode::Balanced, budget);
        stats.candidates = 20;
        stats.malformed = 1;
        stats.culled_outside_fov = 4;
        stats.truncated = 5;
        stats.emitted = 10;
        metrics.record_frame(&stats);
        metrics.record_frame(&FrameStats::without_pose(PerformanceMode::Balanced, budget));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.frames_composed, 2);
        assert_eq!(snapshot.frames_without_pose, 1);
        assert_eq!(snapshot.candidates, 20);
        assert_eq!(snapshot.malformed_skipped, 1);
        assert_eq!(snapshot.culled, 4);
        assert_eq!(snapshot.truncated, 5);
        assert_eq!(snapshot.elements_emitted, 10);
        assert!((snapshot.average_elements_per_frame() - 5.0).abs() < 1e-9);
    }
}
