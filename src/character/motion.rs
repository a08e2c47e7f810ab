//! Kinematic motion of the actor: damped velocities, gravity, ground clamp.
//!
//! Damping and gravity are applied once per frame rather than scaled by the
//! frame time, so the motion depends on the frame rate. Both are plain fields
//! of [`MotionParams`].

use glam::{Affine3A, Quat, Vec3};

use crate::input::Command;

/// Constants of the motion model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Per-frame multiplier on forward and angular velocity.
    pub damping: f32,
    /// Per-frame decrement of vertical velocity.
    pub gravity: f32,
    /// |forward| below this counts as at rest.
    pub rest_forward: f32,
    /// Vertical velocity below this counts as at rest (signed: falling counts).
    pub rest_vertical: f32,
    /// |angular| below this counts as at rest.
    pub rest_angular: f32,
    pub move_impulse: f32,
    pub turn_impulse: f32,
    pub jump_impulse: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            damping: 0.95,
            gravity: 0.1,
            rest_forward: 0.01,
            rest_vertical: 0.01,
            rest_angular: 0.001,
            move_impulse: 1.0,
            turn_impulse: 0.0051,
            jump_impulse: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub forward: f32,
    /// Radians per frame around +Y.
    pub angular: f32,
    /// Units per frame along +Y.
    pub vertical: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActorPose {
    pub position: Vec3,
    /// Rotation around +Y in radians; 0 faces +Z.
    pub heading: f32,
}

impl ActorPose {
    /// Unit +Z rotated about +Y by the heading.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.heading) * Vec3::Z
    }

    /// World transform of the actor root.
    #[must_use]
    pub fn root_matrix(&self) -> Affine3A {
        Affine3A::from_rotation_translation(Quat::from_rotation_y(self.heading), self.position)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MotionIntegrator {
    pub pose: ActorPose,
    pub velocity: Velocity,
    pub params: MotionParams,
}

impl MotionIntegrator {
    #[must_use]
    pub fn new(params: MotionParams) -> Self {
        Self {
            pose: ActorPose::default(),
            velocity: Velocity::default(),
            params,
        }
    }

    /// Adds the command's impulse to the velocity state. Impulses accumulate.
    pub fn apply_impulse(&mut self, command: Command) {
        let p = &self.params;
        match command {
            Command::MoveForward => self.velocity.forward += p.move_impulse,
            Command::MoveBackward => self.velocity.forward -= p.move_impulse,
            Command::TurnLeft => self.velocity.angular += p.turn_impulse,
            Command::TurnRight => self.velocity.angular -= p.turn_impulse,
            Command::Jump => self.velocity.vertical += p.jump_impulse,
            Command::Gesture => {}
        }
    }

    /// Damps forward and angular velocity and applies gravity.
    pub fn decay(&mut self) {
        self.velocity.forward *= self.params.damping;
        self.velocity.angular *= self.params.damping;
        self.velocity.vertical -= self.params.gravity;
    }

    /// Every velocity is below its rest threshold.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        let v = &self.velocity;
        let p = &self.params;
        v.forward.abs() < p.rest_forward
            && v.vertical < p.rest_vertical
            && v.angular.abs() < p.rest_angular
    }

    /// Brings the forward motion to an exact stop.
    pub fn settle(&mut self) {
        self.velocity.forward = 0.0;
    }

    /// Integrates height (with the ground clamp), heading and planar position.
    pub fn integrate(&mut self, dt: f32) {
        self.pose.position.y += self.velocity.vertical;
        if self.pose.position.y < 0.0 {
            self.pose.position.y = 0.0;
            self.velocity.vertical = 0.0;
        }

        self.pose.heading += self.velocity.angular;

        let step = self.pose.forward() * (self.velocity.forward * dt);
        self.pose.position += step;
    }
}
