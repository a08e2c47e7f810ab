//! Character Module
//!
//! The interactive core of the demo:
//!
//! - [`MotionIntegrator`]: damped velocities, gravity and ground clamp
//! - [`AnimState`] / [`AnimationSelector`]: which clip plays, and crossfades between them
//! - [`follow_placement`]: chase camera derived from the actor pose
//! - [`Simulation`]: owns all of the above plus the model, advanced once per frame
//!
//! # Frame order
//!
//! [`Simulation::update`] polls the model load, damps velocities and applies
//! gravity, and returns to Idle if the motion has settled. Once the model is
//! ready it then integrates the pose and places the camera before advancing
//! the mixer.

pub mod follow;
pub mod motion;
pub mod registry;
pub mod selector;
pub mod simulation;
pub mod state;

pub use follow::{FollowParams, follow_placement};
pub use motion::{ActorPose, MotionIntegrator, MotionParams, Velocity};
pub use registry::{ClipName, ClipRegistry};
pub use selector::{AnimationSelector, fade_to_action};
pub use simulation::{Actor, CameraParams, Simulation, SimulationParams};
pub use state::{AnimState, Transition};
