//! Winit input adapter
//!
//! Translates winit keyboard events into the crate's platform-agnostic input types.

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{ButtonState, Key};

/// Maps a winit `PhysicalKey` to a [`Key`]; keys the demo ignores give `None`.
#[must_use]
pub fn translate_key(physical_key: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };

    let key = match code {
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Space => Key::Space,
        KeyCode::KeyS => Key::S,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    };

    Some(key)
}

#[must_use]
pub fn translate_element_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

/// The key of a key-down event. Auto-repeat presses count.
#[must_use]
pub fn key_down(event: &KeyEvent) -> Option<Key> {
    match translate_element_state(event.state) {
        ButtonState::Pressed => translate_key(event.physical_key),
        ButtonState::Released => None,
    }
}
