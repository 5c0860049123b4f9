//! Input events and state for placement mode.

use crate::camera::Camera;
use crate::projection::Surface;
use crate::template::Template;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Symbolic keys placement mode reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Held to arm the delete gesture.
    Shift,
    /// Toggles the ghost's yaw.
    Rotate,
}

/// Everything that can drive the placement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlacementEvent {
    PointerMove { position: Point },
    PointerDown { button: PointerButton },
    PointerUp { button: PointerButton },
    DoubleClick { position: Point },
    KeyDown { key: Key },
    KeyUp { key: Key },
    /// Select a template, or clear the selection with `None`.
    SetTemplate { template: Option<Template> },
    CameraChanged { camera: Camera },
    SurfaceResized { surface: Surface },
}

/// Input listener categories that an event source can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PointerMove,
    PointerDown,
    PointerUp,
    DoubleClick,
    KeyDown,
    KeyUp,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::PointerMove,
        EventKind::PointerDown,
        EventKind::PointerUp,
        EventKind::DoubleClick,
        EventKind::KeyDown,
        EventKind::KeyUp,
    ];
}

impl PlacementEvent {
    /// Listener category, or `None` for updates pushed by the host.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            PlacementEvent::PointerMove { .. } => Some(EventKind::PointerMove),
            PlacementEvent::PointerDown { .. } => Some(EventKind::PointerDown),
            PlacementEvent::PointerUp { .. } => Some(EventKind::PointerUp),
            PlacementEvent::DoubleClick { .. } => Some(EventKind::DoubleClick),
            PlacementEvent::KeyDown { .. } => Some(EventKind::KeyDown),
            PlacementEvent::KeyUp { .. } => Some(EventKind::KeyUp),
            PlacementEvent::SetTemplate { .. }
            | PlacementEvent::CameraChanged { .. }
            | PlacementEvent::SurfaceResized { .. } => None,
        }
    }
}

/// Button, modifier and pointer state tracked across events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    /// Last pointer position in window coordinates.
    pub pointer: Option<Point>,
    /// Primary button is held.
    pub primary_down: bool,
    /// Shift is held, arming the delete gesture.
    pub delete_mode: bool,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track button, key and pointer changes carried by `event`.
    pub fn apply(&mut self, event: &PlacementEvent) {
        match event {
            PlacementEvent::PointerMove { position } | PlacementEvent::DoubleClick { position } => {
                self.pointer = Some(*position);
            }
            PlacementEvent::PointerDown {
                button: PointerButton::Primary,
            } => self.primary_down = true,
            PlacementEvent::PointerUp {
                button: PointerButton::Primary,
            } => self.primary_down = false,
            PlacementEvent::KeyDown { key: Key::Shift } => self.delete_mode = true,
            PlacementEvent::KeyUp { key: Key::Shift } => self.delete_mode = false,
            _ => {}
        }
    }
}

/// Double-click detection constants.
pub const DOUBLE_CLICK_TIME_MS: u64 = 500;
pub const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Detects double-clicks from a stream of primary presses.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    max_interval: Duration,
    max_distance: f64,
    last_click: Option<(Instant, Point)>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(DOUBLE_CLICK_TIME_MS), DOUBLE_CLICK_DISTANCE)
    }
}

impl ClickTracker {
    pub fn new(max_interval: Duration, max_distance: f64) -> Self {
        Self {
            max_interval,
            max_distance,
            last_click: None,
        }
    }

    /// Record a primary press happening now.
    pub fn press(&mut self, position: Point) -> bool {
        self.press_at(position, Instant::now())
    }

    /// Record a primary press at `now`. Returns true if it completes a double-click.
    pub fn press_at(&mut self, position: Point, now: Instant) -> bool {
        if let Some((last_time, last_pos)) = self.last_click {
            let elapsed = now.saturating_duration_since(last_time);
            if elapsed < self.max_interval && last_pos.distance(position) < self.max_distance {
                // Reset so a third click starts a new pair.
                self.last_click = None;
                return true;
            }
        }
        self.last_click = Some((now, position));
        false
    }

    /// Forget the pending first click.
    pub fn reset(&mut self) {
        self.last_click = None;
    }
}
