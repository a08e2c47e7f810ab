//! Character animation states and the transition table between them.

use crate::character::registry::ClipName;
use crate::input::Command;

/// Exactly one animation state is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Walking,
    Jumping,
    Gesturing,
}

/// A requested change of state with its crossfade duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub to: AnimState,
    pub fade: f32,
}

impl AnimState {
    /// The clip that plays while in this state.
    #[must_use]
    pub fn clip(self) -> ClipName {
        match self {
            AnimState::Idle => ClipName::Idle,
            AnimState::Walking => ClipName::Walking,
            AnimState::Jumping => ClipName::Jump,
            AnimState::Gesturing => ClipName::ThumbsUp,
        }
    }

    /// Transition triggered by a command, if the guard allows one.
    #[must_use]
    pub fn on_command(self, command: Command) -> Option<Transition> {
        let (to, fade) = match command {
            Command::MoveForward | Command::MoveBackward => (AnimState::Walking, 0.1),
            Command::TurnLeft | Command::TurnRight => (AnimState::Walking, 0.5),
            Command::Jump => (AnimState::Jumping, 0.1),
            Command::Gesture => (AnimState::Gesturing, 0.0),
        };
        (self != to).then_some(Transition { to, fade })
    }

    /// Transition back to Idle once the motion has settled.
    #[must_use]
    pub fn on_settled(self) -> Option<Transition> {
        (self != AnimState::Idle).then_some(Transition {
            to: AnimState::Idle,
            fade: 0.5,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_ignores_further_movement() {
        assert_eq!(AnimState::Walking.on_command(Command::MoveForward), None);
        assert_eq!(AnimState::Walking.on_command(Command::TurnLeft), None);
    }

    #[test]
    fn jump_interrupts_walking() {
        assert_eq!(
            AnimState::Walking.on_command(Command::Jump),
            Some(Transition {
                to: AnimState::Jumping,
                fade: 0.1
            })
        );
    }

    #[test]
    fn idle_does_not_resettle() {
        assert_eq!(AnimState::Idle.on_settled(), None);
        assert_eq!(AnimState::Gesturing.on_settled().map(|t| t.to), Some(AnimState::Idle));
    }
}
