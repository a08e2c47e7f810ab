//! Drives the mixer from the character's animation state.

use crate::animation::{ActionHandle, AnimationMixer};
use crate::character::registry::ClipRegistry;
use crate::character::state::{AnimState, Transition};

/// Current animation state plus the actions involved in the last crossfade.
#[derive(Debug, Clone, Default)]
pub struct AnimationSelector {
    state: AnimState,
    active: Option<ActionHandle>,
    previous: Option<ActionHandle>,
    last_transition: Option<Transition>,
}

impl AnimationSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> AnimState {
        self.state
    }

    #[must_use]
    pub fn active_action(&self) -> Option<ActionHandle> {
        self.active
    }

    #[must_use]
    pub fn previous_action(&self) -> Option<ActionHandle> {
        self.previous
    }

    /// The most recent transition that was carried out.
    #[must_use]
    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    /// Enters Idle and starts its clip. Called once when the clips become available.
    pub fn start(&mut self, clips: &ClipRegistry, mixer: &mut AnimationMixer) {
        self.state = AnimState::Idle;
        self.previous = None;
        self.active = clips.get(AnimState::Idle.clip());
        if let Some(action) = self.active.and_then(|h| mixer.action_mut(h)) {
            action.play();
        }
    }

    /// Crossfades into `transition.to`. Returns `false`, leaving the state
    /// untouched, when the model has no clip for the target state.
    pub fn apply(
        &mut self,
        transition: Transition,
        clips: &ClipRegistry,
        mixer: &mut AnimationMixer,
    ) -> bool {
        let clip = transition.to.clip();
        let Some(incoming) = clips.get(clip) else {
            log::warn!("No '{clip}' clip, staying {:?}", self.state);
            return false;
        };

        log::debug!(
            "{:?} -> {:?} (fade {:.2}s)",
            self.state,
            transition.to,
            transition.fade
        );

        self.previous = self.active;
        self.active = Some(incoming);
        self.state = transition.to;
        self.last_transition = Some(transition);

        fade_to_action(mixer, self.previous, incoming, transition.fade);
        true
    }
}

/// Fades `outgoing` out and restarts `incoming`, both over `duration` seconds.
/// An action crossfading into itself is only restarted.
pub fn fade_to_action(
    mixer: &mut AnimationMixer,
    outgoing: Option<ActionHandle>,
    incoming: ActionHandle,
    duration: f32,
) {
    if let Some(prev) = outgoing.filter(|&prev| prev != incoming)
        && let Some(action) = mixer.action_mut(prev)
    {
        action.fade_out(duration);
    }

    if let Some(action) = mixer.action_mut(incoming) {
        action
            .reset()
            .set_effective_time_scale(1.0)
            .set_effective_weight(1.0)
            .fade_in(duration)
            .play();
    }
}
