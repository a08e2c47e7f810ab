/// Defines the target property for animation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
}

/// Binding relationship: maps track `track_index` of a clip to the target
/// property of joint `joint` in the rig.
#[derive(Debug, Clone, Copy)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub joint: usize,
    pub target: TargetPath,
}
