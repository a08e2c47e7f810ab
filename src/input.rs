//! Platform-agnostic keyboard input
//!
//! The character only reacts to discrete key-down events. Platform adapters
//! (see [`crate::app::input_adapter`]) translate native events into [`Key`]s;
//! [`Command::from_key`] turns the keys the character understands into
//! commands.

/// Keys the demo consumes (platform-agnostic).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    S,
    Escape,
}

/// Button state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A discrete character command. Each key press produces one command;
/// there is no held-key repetition beyond what the platform's key repeat delivers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
    Jump,
    Gesture,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::MoveForward,
        Command::MoveBackward,
        Command::TurnLeft,
        Command::TurnRight,
        Command::Jump,
        Command::Gesture,
    ];

    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Command::MoveForward),
            Key::ArrowDown => Some(Command::MoveBackward),
            Key::ArrowLeft => Some(Command::TurnLeft),
            Key::ArrowRight => Some(Command::TurnRight),
            Key::Space => Some(Command::Jump),
            Key::S => Some(Command::Gesture),
            Key::Escape => None,
        }
    }
}
