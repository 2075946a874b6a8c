// SPDX-License-Identifier: MPL-2.0
//! Touch input as delivered by the platform, plus id-keyed tracking.

use crate::domain::geometry::Point;
use std::collections::BTreeMap;

/// Platform identifier of one finger, stable until that finger lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TouchId(pub u64);

/// One active touch in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id: TouchId(id),
            x,
            y,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Every touch active at one instant, in platform order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchFrame {
    pub touches: Vec<TouchPoint>,
}

impl TouchFrame {
    #[must_use]
    pub fn new(touches: Vec<TouchPoint>) -> Self {
        Self { touches }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }
}

/// Responder-style touch events.
///
/// `Release` carries the touches that are still down, so a partial release
/// (two fingers to one) arrives with a non-empty frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    Grant(TouchFrame),
    Move(TouchFrame),
    Release(TouchFrame),
}

impl TouchEvent {
    #[must_use]
    pub fn frame(&self) -> &TouchFrame {
        match self {
            TouchEvent::Grant(frame) | TouchEvent::Move(frame) | TouchEvent::Release(frame) => {
                frame
            }
        }
    }
}

/// Last known position of every active touch, ordered by id.
///
/// Deriving the primary touch and the pinch pair from ids (not from frame
/// order) keeps finger-order swaps between frames from reading as rotation.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    active: BTreeMap<TouchId, Point>,
}

impl TouchTracker {
    /// Replaces the tracked set with the touches of `frame`.
    pub fn update(&mut self, frame: &TouchFrame) {
        self.active.clear();
        for touch in &frame.touches {
            self.active.insert(touch.id, touch.position());
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.active.len()
    }

    /// The lowest-id touch.
    #[must_use]
    pub fn primary(&self) -> Option<(TouchId, Point)> {
        self.active.iter().next().map(|(id, point)| (*id, *point))
    }

    /// The two lowest-id touches, lower id first.
    #[must_use]
    pub fn pair(&self) -> Option<[(TouchId, Point); 2]> {
        let mut iter = self.active.iter();
        let (first_id, first) = iter.next()?;
        let (second_id, second) = iter.next()?;
        Some([(*first_id, *first), (*second_id, *second)])
    }
}
