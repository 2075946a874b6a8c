// SPDX-License-Identifier: MPL-2.0
//! Recorded touch scripts, replayed through a [`CropSession`].
//!
//! A script is a TOML file with one `[[event]]` table per touch event:
//!
//! ```toml
//! [[event]]
//! kind = "grant"
//! touches = [{ id = 1, x = 120.0, y = 80.0 }]
//!
//! [[event]]
//! kind = "move"
//! touches = [{ id = 1, x = 150.0, y = 80.0 }]
//!
//! [[event]]
//! kind = "release"
//! ```

use crate::application::CropSession;
use crate::domain::touch::{TouchEvent, TouchFrame, TouchPoint};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Grant,
    Move,
    Release,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScriptTouch {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptEvent {
    pub kind: EventKind,
    /// Touches still down after the event.
    #[serde(default)]
    pub touches: Vec<ScriptTouch>,
}

impl ScriptEvent {
    #[must_use]
    pub fn to_touch_event(&self) -> TouchEvent {
        let frame = TouchFrame::new(
            self.touches
                .iter()
                .map(|t| TouchPoint::new(t.id, t.x, t.y))
                .collect(),
        );
        match self.kind {
            EventKind::Grant => TouchEvent::Grant(frame),
            EventKind::Move => TouchEvent::Move(frame),
            EventKind::Release => TouchEvent::Release(frame),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GestureScript {
    #[serde(default, rename = "event")]
    pub events: Vec<ScriptEvent>,
}

impl GestureScript {
    /// Parses a script from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) for malformed scripts.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a script file.
    ///
    /// # Errors
    ///
    /// I/O and parse failures.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Feeds every event to `session`, in order.
    pub fn replay(&self, session: &mut CropSession) {
        for event in &self.events {
            session.handle_touch(&event.to_touch_event());
        }
        log::debug!("replayed {} touch events", self.events.len());
    }
}
