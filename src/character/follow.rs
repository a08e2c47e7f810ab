//! Chase camera placement, recomputed from the actor pose every frame.

use glam::Vec3;

use crate::character::motion::ActorPose;

/// Placement of the chase camera relative to the actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowParams {
    /// Horizontal distance behind the actor.
    pub distance: f32,
    /// Absolute camera height.
    pub height: f32,
    /// How far above the actor's origin the camera aims.
    pub look_at_lift: f32,
}

impl Default for FollowParams {
    fn default() -> Self {
        Self {
            distance: 20.0,
            height: 8.0,
            look_at_lift: 3.0,
        }
    }
}

/// Camera position and look-at target for `pose`. No smoothing.
#[must_use]
pub fn follow_placement(pose: &ActorPose, params: &FollowParams) -> (Vec3, Vec3) {
    let above = Vec3::new(pose.position.x, params.height, pose.position.z);
    let eye = above - pose.forward() * params.distance;
    let target = pose.position + Vec3::Y * params.look_at_lift;
    (eye, target)
}
