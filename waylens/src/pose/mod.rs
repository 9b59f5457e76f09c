//! Observer pose and last-known-good pose tracking.
//!
//! A [`Pose`] is a position plus compass heading. Sensors publish poses on a
//! best-effort cadence; the render loop asks a [`PoseSource`] for the current
//! reading once per frame.
//!
//! # Staleness
//!
//! [`PoseTracker`] keeps the most recent pose with the time it arrived.
//! Readings older than the configured maximum age are reported as
//! [`PoseReading::Unavailable`] so the overlay never draws stale positions.
//!
//! ```text
//! sensor thread ──update(pose)──► PoseTracker ◄──current_pose()── render loop
//! ```

use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::geo::{normalize_bearing, GeoPoint};

/// Default maximum age before a pose is considered stale.
const DEFAULT_MAX_POSE_AGE: Duration = Duration::from_secs(5);

/// Observer location and facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: GeoPoint,
    /// Compass heading in degrees `[0, 360)`, clockwise from north.
    pub heading_degrees: f64,
}

impl Pose {
    /// Create a pose, normalizing the heading into `[0, 360)`.
    pub fn new(position: GeoPoint, heading_degrees: f64) -> Self {
        Self {
            position,
            heading_degrees: normalize_bearing(heading_degrees),
        }
    }

    /// Whether position and heading are all finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.heading_degrees.is_finite()
    }
}

/// Result of asking for the current pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseReading {
    /// A usable pose.
    Available(Pose),
    /// No location/heading fix yet, or the last fix went stale.
    Unavailable,
}

impl PoseReading {
    /// The pose, if available.
    pub fn pose(&self) -> Option<Pose> {
        match self {
            PoseReading::Available(pose) => Some(*pose),
            PoseReading::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PoseReading::Available(_))
    }
}

impl From<Option<Pose>> for PoseReading {
    fn from(pose: Option<Pose>) -> Self {
        match pose {
            Some(pose) => PoseReading::Available(pose),
            None => PoseReading::Unavailable,
        }
    }
}

/// Supplier of the observer's current pose.
pub trait PoseSource: Send + Sync {
    fn current_pose(&self) -> PoseReading;
}

/// A single recorded pose.
#[derive(Debug, Clone, Copy)]
struct PoseSample {
    pose: Pose,
    timestamp: Instant,
}

/// Last-known-good pose holder.
///
/// Thread-safe: sensors call [`update`](Self::update) while the render loop
/// reads through [`PoseSource::current_pose`].
#[derive(Debug)]
pub struct PoseTracker {
    latest: RwLock<Option<PoseSample>>,
    max_age: Duration,
}

impl Default for PoseTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseTracker {
    /// Create a tracker with the default staleness window.
    pub fn new() -> Self {
        Self::with_max_age(DEFAULT_MAX_POSE_AGE)
    }

    /// Create a tracker with an explicit staleness window.
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            latest: RwLock::new(None),
            max_age,
        }
    }

    /// Record a new pose from the sensors.
    ///
    /// Non-finite poses are ignored and the previous good pose is kept.
    /// Returns true if the pose was accepted.
    pub fn update(&self, pose: Pose) -> bool {
        self.update_at(pose, Instant::now())
    }

    /// Record a pose with an explicit timestamp.
    pub fn update_at(&self, pose: Pose, timestamp: Instant) -> bool {
        if !pose.is_finite() {
            tracing::warn!(?pose, "Ignoring non-finite pose from sensors");
            return false;
        }
        *self.latest.write() = Some(PoseSample { pose, timestamp });
        true
    }

    /// Forget the last pose (e.g. location permission revoked).
    pub fn mark_unavailable(&self) {
        *self.latest.write() = None;
    }

    /// Reading as of `now`.
    pub fn reading_at(&self, now: Instant) -> PoseReading {
        match *self.latest.read() {
            Some(sample) if now.saturating_duration_since(sample.timestamp) <= self.max_age => {
                PoseReading::Available(sample.pose)
            }
            _ => PoseReading::Unavailable,
        }
    }

    /// Age of the last recorded pose, if any.
    pub fn last_update_age(&self) -> Option<Duration> {
        let latest = *self.latest.read();
        latest.map(|sample| sample.timestamp.elapsed())
    }
}

impl PoseSource for PoseTracker {
    fn current_pose(&self) -> PoseReading {
        self.reading_at(Instant::now())
    }
}
