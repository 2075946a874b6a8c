// SPDX-License-Identifier: MPL-2.0
//! Touch gesture interpreter.
//!
//! [`GestureSession`] turns responder-style touch events into updates of a
//! [`LiveTransform`]:
//!
//! - one finger pans, measured from where that finger went down
//! - two fingers pinch-zoom, rotate (with snapping) and pan by their centroid
//! - lifting every finger settles the transform (release snap, zoom-out
//!   recovery, re-clamp)
//!
//! The interpreter never fails. Frames it cannot use are ignored, and a pinch
//! whose fingers start on top of each other waits for a usable frame.

pub mod pinch;

pub use pinch::{scale_bounds, ScaleBounds};

use crate::domain::clamp::ClampPolicy;
use crate::domain::geometry::{Point, Vector};
use crate::domain::snap::RotationSnap;
use crate::domain::touch::{TouchEvent, TouchFrame, TouchId, TouchTracker};
use crate::domain::transform::{LiveTransform, TransformState, Transition};
use pinch::PinchSnapshot;

/// Default minimum finger distance (logical pixels) for starting a pinch.
pub const DEFAULT_PINCH_EPSILON: f64 = 1e-3;

/// Tunables for gesture interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub scale_bounds: ScaleBounds,
    pub snap: RotationSnap,
    pub pinch_epsilon: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            scale_bounds: ScaleBounds::default(),
            snap: RotationSnap::default(),
            pinch_epsilon: DEFAULT_PINCH_EPSILON,
        }
    }
}

/// Observable phase of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    SinglePan,
    DualPinchRotate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanAnchor {
    touch: TouchId,
    start: Point,
    translation_at_start: Vector,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    Idle,
    Pan(PanAnchor),
    /// `snapshot` stays `None` until a frame with separated fingers arrives.
    Pinch {
        pair: [TouchId; 2],
        snapshot: Option<PinchSnapshot>,
    },
}

/// Frame-by-frame touch interpreter for one crop session.
#[derive(Debug, Clone)]
pub struct GestureSession {
    config: GestureConfig,
    clamp: ClampPolicy,
    tracker: TouchTracker,
    tracking: Tracking,
}

impl GestureSession {
    #[must_use]
    pub fn new(config: GestureConfig, clamp: ClampPolicy) -> Self {
        Self {
            config,
            clamp,
            tracker: TouchTracker::default(),
            tracking: Tracking::Idle,
        }
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self.tracking {
            Tracking::Idle => GesturePhase::Idle,
            Tracking::Pan(_) => GesturePhase::SinglePan,
            Tracking::Pinch { .. } => GesturePhase::DualPinchRotate,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    #[must_use]
    pub fn clamp_policy(&self) -> &ClampPolicy {
        &self.clamp
    }

    /// Drops any in-progress gesture without touching the transform.
    pub fn cancel(&mut self) {
        self.tracker.clear();
        self.tracking = Tracking::Idle;
    }

    /// Processes one event to completion.
    pub fn handle(&mut self, event: &TouchEvent, live: &mut LiveTransform) {
        let before = self.phase();
        match event {
            TouchEvent::Grant(frame) => {
                self.tracker.update(frame);
                self.reanchor(live.current());
            }
            TouchEvent::Move(frame) => self.on_move(frame, live),
            TouchEvent::Release(remaining) => {
                self.tracker.update(remaining);
                if remaining.is_empty() {
                    self.tracking = Tracking::Idle;
                    let settled = settle(live.current(), &self.clamp, self.config.snap);
                    live.apply(settled, Transition::Animated);
                } else {
                    self.reanchor(live.current());
                }
            }
        }
        let after = self.phase();
        if before != after {
            log::debug!("gesture phase {before:?} -> {after:?}");
        }
    }

    /// Restarts tracking from the live transform using the current touches.
    fn reanchor(&mut self, current: TransformState) {
        self.tracking = if let Some([(first, _), (second, _)]) = self.tracker.pair() {
            Tracking::Pinch {
                pair: [first, second],
                snapshot: None,
            }
        } else if let Some((touch, start)) = self.tracker.primary() {
            Tracking::Pan(PanAnchor {
                touch,
                start,
                translation_at_start: current.translation(),
            })
        } else {
            Tracking::Idle
        };
    }

    fn on_move(&mut self, frame: &TouchFrame, live: &mut LiveTransform) {
        if frame.is_empty() {
            return;
        }
        self.tracker.update(frame);
        let current = live.current();

        if let Some(pair) = self.tracker.pair() {
            let ids = [pair[0].0, pair[1].0];
            let same_pair = matches!(
                self.tracking,
                Tracking::Pinch { pair: tracked, .. } if tracked == ids
            );
            if !same_pair {
                self.tracking = Tracking::Pinch {
                    pair: ids,
                    snapshot: None,
                };
            }
            let Tracking::Pinch { snapshot, .. } = &mut self.tracking else {
                return;
            };

            if snapshot.is_none() {
                *snapshot = PinchSnapshot::capture(
                    pair,
                    current.scale,
                    current.rotation_degrees,
                    self.config.pinch_epsilon,
                );
                if snapshot.is_none() {
                    log::trace!("pinch start deferred: fingers closer than epsilon");
                }
                return;
            }
            let Some(active) = snapshot.as_mut() else {
                return;
            };

            let (first, second) = (pair[0].1, pair[1].1);
            let scale = self
                .config
                .scale_bounds
                .clamp(active.scale_for(first, second));
            let rotation = self
                .config
                .snap
                .during_gesture(active.advance_rotation(first, second));
            let candidate = current.translation() + active.advance_midpoint(first, second);
            let translation = self.clamp.clamp(candidate, scale, rotation);

            live.apply(
                TransformState {
                    scale,
                    rotation_degrees: rotation,
                    ..current.with_translation(translation)
                },
                Transition::Immediate,
            );
            return;
        }

        let Some((touch, position)) = self.tracker.primary() else {
            return;
        };
        let anchor = match self.tracking {
            Tracking::Pan(anchor) if anchor.touch == touch => anchor,
            _ => {
                // Count dropped (or the finger changed) without a release event.
                self.reanchor(current);
                return;
            }
        };

        let candidate = anchor.translation_at_start + position.delta_from(anchor.start);
        let translation = self
            .clamp
            .clamp(candidate, current.scale, current.rotation_degrees);
        live.apply(current.with_translation(translation), Transition::Immediate);
    }
}

/// Corrections applied once a gesture ends (and again at commit time).
///
/// The rotation gets the release snap. A view zoomed out below the cover
/// scale springs back to it, centered; otherwise the translation is re-clamped.
#[must_use]
pub fn settle(state: TransformState, clamp: &ClampPolicy, snap: RotationSnap) -> TransformState {
    let rotation_degrees = snap.on_release(state.rotation_degrees);
    let cover = clamp.cover_scale();
    if state.scale < cover {
        return TransformState {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: cover,
            rotation_degrees,
            flip_horizontal: state.flip_horizontal,
        };
    }
    let translation = clamp.clamp(state.translation(), state.scale, rotation_degrees);
    TransformState {
        rotation_degrees,
        ..state.with_translation(translation)
    }
}
