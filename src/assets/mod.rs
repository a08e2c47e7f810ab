//! Asset Module
//!
//! - [`GltfLoader`]: reads the rig and the recognised clips from a glTF file
//! - [`ModelLoad`]: runs that load off the frame loop and reports back over a channel

pub mod load;
pub mod loaders;

pub use load::ModelLoad;
pub use loaders::GltfLoader;

use crate::animation::AnimationClip;
use crate::character::registry::ClipName;
use crate::scene::Rig;

/// What a successful model load produces.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub rig: Rig,
    /// Only clips whose names are in the recognised set, in file order.
    pub clips: Vec<(ClipName, AnimationClip)>,
}
