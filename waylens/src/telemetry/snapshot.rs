//! Point-in-time copy of overlay metrics.

use serde::Serialize;

/// Snapshot of [`OverlayMetrics`](super::OverlayMetrics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub frames_composed: u64,
    pub frames_without_pose: u64,
    pub candidates: u64,
    pub malformed_skipped: u64,
    pub culled: u64,
    pub truncated: u64,
    pub elements_emitted: u64,
}

impl MetricsSnapshot {
    /// Mean element count over all composed frames.
    pub fn average_elements_per_frame(&self) -> f64 {
        if self.frames_composed == 0 {
            0.0
        } else {
            self.elements_emitted as f64 / self.frames_composed as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_with_no_frames() {
        assert_eq!(MetricsSnapshot::default().average_elements_per_frame(), 0.0);
    }
}
