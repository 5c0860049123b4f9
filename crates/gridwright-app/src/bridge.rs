//! Translation from winit window input to placement events.

use gridwright_core::controller::{EventSource, ListenerHandle, ListenerRegistry};
use gridwright_core::input::{ClickTracker, EventKind, Key, PlacementEvent, PointerButton};
use kurbo::Point;
use std::time::Instant;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Map a winit mouse button. Back, forward and other buttons are not used.
pub fn map_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Map a physical key to a placement key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Key::Shift),
        KeyCode::KeyR => Some(Key::Rotate),
        _ => None,
    }
}

/// Event source backed by winit window events.
///
/// Events are only produced for kinds with an active listener, so nothing
/// reaches the engine while placement mode is off.
#[derive(Debug)]
pub struct InputBridge {
    listeners: ListenerRegistry,
    clicks: ClickTracker,
    cursor: Option<Point>,
}

impl InputBridge {
    pub fn new(clicks: ClickTracker) -> Self {
        Self {
            listeners: ListenerRegistry::new(),
            clicks,
            cursor: None,
        }
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Last cursor position seen, whether or not it was delivered.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// `WindowEvent::CursorMoved`.
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<PlacementEvent> {
        let position = Point::new(position.x, position.y);
        self.cursor = Some(position);
        self.deliver(PlacementEvent::PointerMove { position })
    }

    /// `WindowEvent::MouseInput`.
    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Vec<PlacementEvent> {
        self.mouse_input_at(state, button, Instant::now())
    }

    /// `WindowEvent::MouseInput` at an explicit time.
    ///
    /// A second primary press close enough in time and space to the first
    /// also yields a `DoubleClick`.
    pub fn mouse_input_at(&mut self, state: ElementState, button: MouseButton, now: Instant) -> Vec<PlacementEvent> {
        let Some(button) = map_button(button) else {
            log::trace!("Ignoring unmapped mouse button {button:?}");
            return Vec::new();
        };

        let mut events = Vec::new();
        match state {
            ElementState::Pressed => {
                events.push(PlacementEvent::PointerDown { button });
                if button == PointerButton::Primary {
                    if let Some(position) = self.cursor {
                        if self.clicks.press_at(position, now) {
                            events.push(PlacementEvent::DoubleClick { position });
                        }
                    }
                }
            }
            ElementState::Released => events.push(PlacementEvent::PointerUp { button }),
        }
        events.into_iter().filter_map(|event| self.deliver(event)).collect()
    }

    /// `WindowEvent::KeyboardInput` with a physical key code and the event's
    /// `repeat` flag. Auto-repeated presses are dropped.
    pub fn keyboard_input(&mut self, state: ElementState, code: KeyCode, repeat: bool) -> Option<PlacementEvent> {
        let Some(key) = map_key(code) else {
            log::trace!("Ignoring unmapped key {code:?}");
            return None;
        };
        if repeat && state == ElementState::Pressed {
            log::trace!("Ignoring repeated {key:?}");
            return None;
        }
        let event = match state {
            ElementState::Pressed => PlacementEvent::KeyDown { key },
            ElementState::Released => PlacementEvent::KeyUp { key },
        };
        self.deliver(event)
    }

    fn deliver(&self, event: PlacementEvent) -> Option<PlacementEvent> {
        self.listeners.accepts(&event).then_some(event)
    }
}

impl EventSource for InputBridge {
    fn acquire(&mut self, kinds: &[EventKind]) -> ListenerHandle {
        self.listeners.acquire(kinds)
    }

    fn release(&mut self, handle: ListenerHandle) {
        self.listeners.release(handle);
        if self.listeners.active_count() == 0 {
            self.clicks.reset();
        }
    }
}
