// SPDX-License-Identifier: MPL-2.0
//! Two-finger pinch/rotate tracking.

use crate::domain::geometry::{self, Point};
use crate::domain::touch::TouchId;
use std::f64::consts::PI;

/// Scale bounds for interactive zoom.
pub mod scale_bounds {
    /// Default minimum scale; below 1 the image may under-fill the window mid-pinch.
    pub const MIN: f64 = 0.5;
    /// Default maximum scale.
    pub const MAX: f64 = 5.0;
    /// Smallest accepted value for either bound.
    pub const FLOOR: f64 = 0.01;
}

/// Interactive scale range, guaranteed ordered and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    min: f64,
    max: f64,
}

impl ScaleBounds {
    /// Creates bounds, swapping them if given in the wrong order.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let min = min.max(scale_bounds::FLOOR);
        let max = max.max(scale_bounds::FLOOR);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self::new(scale_bounds::MIN, scale_bounds::MAX)
    }
}

/// Wraps an angle difference into `(-PI, PI]`.
pub(crate) fn wrap_radians(delta: f64) -> f64 {
    let mut wrapped = delta % (2.0 * PI);
    if wrapped > PI {
        wrapped -= 2.0 * PI;
    } else if wrapped <= -PI {
        wrapped += 2.0 * PI;
    }
    wrapped
}

/// Values captured on the first usable frame of a two-finger gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PinchSnapshot {
    pub start_distance: f64,
    pub start_scale: f64,
    pub rotation_at_start: f64,
    /// Angle between the fingers on the previous frame.
    pub last_angle: f64,
    /// Finger rotation since the snapshot, unwrapped frame by frame.
    pub swept_radians: f64,
    pub last_midpoint: Point,
}

impl PinchSnapshot {
    /// Returns `None` when the fingers are too close for a usable distance ratio.
    ///
    /// A zero or non-finite distance is always rejected, whatever `epsilon` is.
    pub fn capture(
        pair: [(TouchId, Point); 2],
        scale: f64,
        rotation_degrees: f64,
        epsilon: f64,
    ) -> Option<Self> {
        let [(_, first), (_, second)] = pair;
        let start_distance = geometry::distance(first, second);
        if !start_distance.is_finite() || start_distance <= 0.0 || start_distance < epsilon {
            return None;
        }
        Some(Self {
            start_distance,
            start_scale: scale,
            rotation_at_start: rotation_degrees,
            last_angle: geometry::angle(first, second),
            swept_radians: 0.0,
            last_midpoint: geometry::midpoint(first, second),
        })
    }

    /// Scale implied by the current finger distance, before bounds are applied.
    pub fn scale_for(&self, first: Point, second: Point) -> f64 {
        self.start_scale * geometry::distance(first, second) / self.start_distance
    }

    /// Advances the swept angle and returns the unsnapped rotation in degrees.
    pub fn advance_rotation(&mut self, first: Point, second: Point) -> f64 {
        let angle = geometry::angle(first, second);
        self.swept_radians += wrap_radians(angle - self.last_angle);
        self.last_angle = angle;
        self.rotation_at_start + geometry::to_degrees(self.swept_radians)
    }

    /// Returns how far the pinch centroid moved since the previous frame.
    pub fn advance_midpoint(&mut self, first: Point, second: Point) -> geometry::Vector {
        let midpoint = geometry::midpoint(first, second);
        let delta = midpoint.delta_from(self.last_midpoint);
        self.last_midpoint = midpoint;
        delta
    }
}
