//! The fixed set of clips the character understands and their mixer handles.

use crate::animation::{ActionHandle, LoopMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipName {
    Idle,
    Walking,
    Jump,
    ThumbsUp,
}

impl ClipName {
    pub const ALL: [ClipName; 4] = [
        ClipName::Idle,
        ClipName::Walking,
        ClipName::Jump,
        ClipName::ThumbsUp,
    ];

    /// Name of the clip inside the model file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ClipName::Idle => "Idle",
            ClipName::Walking => "Walking",
            ClipName::Jump => "Jump",
            ClipName::ThumbsUp => "ThumbsUp",
        }
    }

    /// Recognises a clip by its exact name; anything else is not ours.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|clip| clip.as_str() == name)
    }

    /// Jump plays once and holds its last frame; the rest loop.
    #[must_use]
    pub fn playback(self) -> (LoopMode, bool) {
        match self {
            ClipName::Jump => (LoopMode::Once, true),
            ClipName::Idle | ClipName::Walking | ClipName::ThumbsUp => (LoopMode::Loop, false),
        }
    }

    fn slot(self) -> usize {
        match self {
            ClipName::Idle => 0,
            ClipName::Walking => 1,
            ClipName::Jump => 2,
            ClipName::ThumbsUp => 3,
        }
    }
}

impl std::fmt::Display for ClipName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action handle per recognised clip, filled once when the model arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipRegistry {
    slots: [Option<ActionHandle>; 4],
}

impl ClipRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: ClipName, handle: ActionHandle) {
        self.slots[name.slot()] = Some(handle);
    }

    #[must_use]
    pub fn get(&self, name: ClipName) -> Option<ActionHandle> {
        self.slots[name.slot()]
    }

    #[must_use]
    pub fn contains(&self, name: ClipName) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClipName, ActionHandle)> + '_ {
        ClipName::ALL
            .into_iter()
            .filter_map(|name| self.get(name).map(|handle| (name, handle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_only_the_fixed_set() {
        assert_eq!(ClipName::from_name("Jump"), Some(ClipName::Jump));
        assert_eq!(ClipName::from_name("jump"), None);
        assert_eq!(ClipName::from_name("Dance"), None);
    }
}
