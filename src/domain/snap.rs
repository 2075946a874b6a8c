// SPDX-License-Identifier: MPL-2.0
//! Rotation snapping towards axis-aligned orientations.
//!
//! Two strengths are used: a tight "magnetic" threshold while fingers are
//! still rotating, and a wider one applied once when the gesture ends.

/// Snap bounds in degrees.
pub mod snap_bounds {
    /// Default threshold applied during a live two-finger rotation.
    pub const GESTURE_THRESHOLD: f64 = 5.0;
    /// Default threshold applied when all touches lift.
    pub const RELEASE_THRESHOLD: f64 = 15.0;
    /// Largest useful threshold: half a right angle covers every angle.
    pub const MAX_THRESHOLD: f64 = 45.0;
}

/// Returns the multiple of 90° nearest to `degrees` (ties round away from zero).
#[must_use]
pub fn nearest_right_angle(degrees: f64) -> f64 {
    // `+ 0.0` folds a negative zero into a positive one.
    (degrees / 90.0).round() * 90.0 + 0.0
}

fn snap(degrees: f64, threshold: f64) -> f64 {
    let nearest = nearest_right_angle(degrees);
    if (degrees - nearest).abs() <= threshold {
        nearest
    } else {
        degrees
    }
}

/// Snaps `degrees` to the nearest right angle if it lies within `threshold` of it.
#[must_use]
pub fn snap_during_gesture(degrees: f64, threshold: f64) -> f64 {
    snap(degrees, threshold)
}

/// Same rule as [`snap_during_gesture`], intended for the wider release threshold.
#[must_use]
pub fn snap_on_release(degrees: f64, threshold: f64) -> f64 {
    snap(degrees, threshold)
}

/// Pair of snap thresholds used by a gesture session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSnap {
    gesture_threshold: f64,
    release_threshold: f64,
}

impl RotationSnap {
    /// Creates a snap policy, clamping both thresholds to `[0, MAX_THRESHOLD]`.
    #[must_use]
    pub fn new(gesture_threshold: f64, release_threshold: f64) -> Self {
        Self {
            gesture_threshold: gesture_threshold.clamp(0.0, snap_bounds::MAX_THRESHOLD),
            release_threshold: release_threshold.clamp(0.0, snap_bounds::MAX_THRESHOLD),
        }
    }

    #[must_use]
    pub fn gesture_threshold(self) -> f64 {
        self.gesture_threshold
    }

    #[must_use]
    pub fn release_threshold(self) -> f64 {
        self.release_threshold
    }

    #[must_use]
    pub fn during_gesture(self, degrees: f64) -> f64 {
        snap_during_gesture(degrees, self.gesture_threshold)
    }

    #[must_use]
    pub fn on_release(self, degrees: f64) -> f64 {
        snap_on_release(degrees, self.release_threshold)
    }
}

impl Default for RotationSnap {
    fn default() -> Self {
        Self::new(snap_bounds::GESTURE_THRESHOLD, snap_bounds::RELEASE_THRESHOLD)
    }
}
