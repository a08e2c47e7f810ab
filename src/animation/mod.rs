//! Animation Module
//!
//! Keyframe clips, per-clip playback actions with fade envelopes, and a mixer
//! that blends every running action onto a [`Rig`](crate::scene::Rig).

pub mod action;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, LoopMode, TrackValue};
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use mixer::{ActionHandle, AnimationMixer, bind_clip};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
