use raylib::prelude::*;

use crate::constants::*;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum KeyAction {
    Previous,
    Next,
    First,
    Last,
    Celebrate,
}

/// One input occurrence, in the order it is handled within a frame.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputEvent {
    PointerMoved(Vector2),
    PointerPressed(Vector2),
    /// Pointer moved while the button is held.
    PointerDragged(Vector2),
    PointerReleased(Vector2),
    TouchStarted,
    /// Scroll delta in browser convention: positive `dx` scrolls towards the
    /// right, positive `dy` scrolls down.
    Wheel { dx: f32, dy: f32 },
    Key(KeyAction),
    /// Window lost focus mid-gesture.
    FocusLost,
}

const KEY_BINDINGS: [(KeyboardKey, KeyAction); 5] = [
    (KeyboardKey::KEY_LEFT, KeyAction::Previous),
    (KeyboardKey::KEY_RIGHT, KeyAction::Next),
    (KeyboardKey::KEY_HOME, KeyAction::First),
    (KeyboardKey::KEY_END, KeyAction::Last),
    (KeyboardKey::KEY_SPACE, KeyAction::Celebrate),
];

/// Converts raylib's polled input state into events.
#[derive(Debug)]
pub struct InputCollector {
    touching: bool,
    focused: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self { touching: false, focused: true }
    }

    pub fn collect(&mut self, rl: &RaylibHandle) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let position = rl.get_mouse_position();

        let focused = rl.is_window_focused();
        if self.focused && !focused {
            events.push(InputEvent::FocusLost);
        }
        self.focused = focused;

        let touching = rl.get_touch_point_count() > 0;
        if touching && !self.touching {
            events.push(InputEvent::TouchStarted);
        }
        self.touching = touching;

        let delta = rl.get_mouse_delta();
        let moved = delta.x != 0.0 || delta.y != 0.0;
        if moved {
            events.push(InputEvent::PointerMoved(position));
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            events.push(InputEvent::PointerPressed(position));
        } else if moved && rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
            events.push(InputEvent::PointerDragged(position));
        }
        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            events.push(InputEvent::PointerReleased(position));
        }

        let wheel = rl.get_mouse_wheel_move_v();
        if wheel.x != 0.0 || wheel.y != 0.0 {
            events.push(wheel_event(wheel.into()));
        }

        for (key, action) in KEY_BINDINGS {
            if rl.is_key_pressed(key) {
                events.push(InputEvent::Key(action));
            }
        }

        events
    }
}

/// raylib reports notches with positive values for up/left scrolling.
/// Flip and scale to pixel deltas so thresholds read like browser ones.
pub fn wheel_event(notches: Vector2) -> InputEvent {
    InputEvent::Wheel {
        dx: -notches.x * WHEEL_PIXELS_PER_NOTCH,
        dy: -notches.y * WHEEL_PIXELS_PER_NOTCH,
    }
}
