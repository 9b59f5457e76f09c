//! Per-frame composition statistics.

use serde::Serialize;

use crate::overlay::Culled;
use crate::performance::{PerformanceBudget, PerformanceMode};

/// What happened to the candidates of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Mode the frame was composed under.
    pub mode: PerformanceMode,
    /// Budget resolved for that mode.
    pub budget: PerformanceBudget,
    /// Whether a usable pose was available.
    pub pose_available: bool,
    /// Objects offered by the catalogue.
    pub candidates: usize,
    /// Objects dropped by the per-category pre-limit.
    pub pre_limited: usize,
    /// Objects skipped for non-finite coordinates.
    pub malformed: usize,
    pub culled_out_of_range: usize,
    pub culled_outside_fov: usize,
    /// Objects that survived culling.
    pub visible: usize,
    /// Route waypoints exempt from the budget.
    pub reserved_waypoints: usize,
    /// Visible objects dropped by budget truncation.
    pub truncated: usize,
    /// Elements in the final list.
    pub emitted: usize,
}

impl FrameStats {
    pub fn new(mode: PerformanceMode, budget: PerformanceBudget) -> Self {
        Self {
            mode,
            budget,
            pose_available: true,
            candidates: 0,
            pre_limited: 0,
            malformed: 0,
            culled_out_of_range: 0,
            culled_outside_fov: 0,
            visible: 0,
            reserved_waypoints: 0,
            truncated: 0,
            emitted: 0,
        }
    }

    /// Stats for a frame composed without a pose.
    pub fn without_pose(mode: PerformanceMode, budget: PerformanceBudget) -> Self {
        Self {
            pose_available: false,
            ..Self::new(mode, budget)
        }
    }

    pub(crate) fn record_cull(&mut self, reason: Culled) {
        match reason {
            Culled::OutOfRange => self.culled_out_of_range += 1,
            Culled::OutsideFieldOfView => self.culled_outside_fov += 1,
        }
    }

    /// Total objects culled for range or cone.
    pub fn culled(&self) -> usize {
        self.culled_out_of_range + self.culled_outside_fov
    }
}
