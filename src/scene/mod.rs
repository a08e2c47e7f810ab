//! Scene Module
//!
//! The handful of spatial types the demo needs:
//!
//! - [`Transform`]: TRS of a joint, the actor root, or the camera
//! - [`Rig`]: the joint hierarchy that animation clips drive
//! - [`Camera`]: perspective camera with a cached projection

pub mod camera;
pub mod rig;
pub mod transform;

pub use camera::Camera;
pub use rig::{Joint, Rig};
pub use transform::Transform;
