#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! An interactive rigged character: keyboard impulses move it around a grid,
//! a small state machine crossfades its animation clips, and a chase camera
//! follows it.

pub mod animation;
pub mod app;
pub mod assets;
pub mod character;
pub mod errors;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod utils;

pub use animation::{AnimationAction, AnimationClip, AnimationMixer, LoopMode};
pub use app::{App, AppSettings};
pub use assets::{GltfLoader, LoadedModel, ModelLoad};
pub use character::{AnimState, Simulation, SimulationParams};
pub use errors::{Result, WalkerError};
pub use input::{Command, Key};
pub use renderer::{RenderSettings, Renderer};
pub use scene::{Camera, Rig};
