// SPDX-License-Identifier: MPL-2.0
//! The view transform of the image relative to the crop window.
//!
//! [`TransformState`] is a plain value. [`LiveTransform`] owns the current
//! value and is the only place it changes; renderers subscribe to it.

use crate::domain::geometry::Vector;
use std::fmt;

/// Where the image sits relative to the crop window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub rotation_degrees: f64,
    pub flip_horizontal: bool,
}

impl TransformState {
    /// No translation, unit scale, no rotation, not flipped.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            rotation_degrees: 0.0,
            flip_horizontal: false,
        }
    }

    #[must_use]
    pub fn translation(&self) -> Vector {
        Vector::new(self.translate_x, self.translate_y)
    }

    #[must_use]
    pub fn with_translation(self, translation: Vector) -> Self {
        Self {
            translate_x: translation.dx,
            translate_y: translation.dy,
            ..self
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

/// How a renderer should move to a new transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Follow the finger: jump straight to the new value.
    Immediate,
    /// A correction (snap, zoom-out recovery, reset): tween to the new value.
    Animated,
}

/// Handle returned by [`LiveTransform::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&TransformState, Transition) + Send>;

/// Single owner of the current [`TransformState`].
pub struct LiveTransform {
    state: TransformState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl LiveTransform {
    #[must_use]
    pub fn new(initial: TransformState) -> Self {
        Self {
            state: initial,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> TransformState {
        self.state
    }

    /// Replaces the whole state at once and notifies observers if it changed.
    pub fn apply(&mut self, next: TransformState, transition: Transition) {
        if next == self.state {
            return;
        }
        self.state = next;
        for (_, observer) in &mut self.observers {
            observer(&self.state, transition);
        }
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&TransformState, Transition) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }
}

impl Default for LiveTransform {
    fn default() -> Self {
        Self::new(TransformState::identity())
    }
}

impl fmt::Debug for LiveTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveTransform")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn identity_is_the_default() {
        let state = TransformState::default();
        assert_eq!(state.translation(), Vector::ZERO);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.rotation_degrees, 0.0);
        assert!(!state.flip_horizontal);
    }

    #[test]
    fn with_translation_keeps_other_fields() {
        let state = TransformState {
            scale: 2.0,
            rotation_degrees: 30.0,
            flip_horizontal: true,
            ..TransformState::identity()
        };
        let moved = state.with_translation(Vector::new(4.0, -2.0));
        assert_eq!(moved.translate_x, 4.0);
        assert_eq!(moved.translate_y, -2.0);
        assert_eq!(moved.scale, 2.0);
        assert_eq!(moved.rotation_degrees, 30.0);
        assert!(moved.flip_horizontal);
    }

    #[test]
    fn observers_see_every_distinct_snapshot() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut live = LiveTransform::default();
        let sink = Arc::clone(&seen);
        live.subscribe(move |state, transition| {
            sink.lock().unwrap().push((state.scale, transition));
        });

        let zoomed = TransformState {
            scale: 2.0,
            ..TransformState::identity()
        };
        live.apply(zoomed, Transition::Immediate);
        live.apply(zoomed, Transition::Immediate);
        live.apply(TransformState::identity(), Transition::Animated);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(2.0, Transition::Immediate), (1.0, Transition::Animated)]
        );
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let count = Arc::new(Mutex::new(0));
        let mut live = LiveTransform::default();
        let sink = Arc::clone(&count);
        let id = live.subscribe(move |_, _| *sink.lock().unwrap() += 1);

        live.apply(
            TransformState {
                scale: 3.0,
                ..TransformState::identity()
            },
            Transition::Immediate,
        );
        assert!(live.unsubscribe(id));
        assert!(!live.unsubscribe(id));
        live.apply(TransformState::identity(), Transition::Immediate);

        assert_eq!(*count.lock().unwrap(), 1);
    }
}
