//! Motion Integrator Tests
//!
//! Tests for:
//! - Impulses per command
//! - Damping convergence and gravity
//! - Ground clamp and the settled-to-rest predicate
//! - Heading and planar integration

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use walker::character::{MotionIntegrator, MotionParams};
use walker::input::Command;

const EPSILON: f32 = 1e-5;
const DT: f32 = 1.0 / 60.0;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn step(motion: &mut MotionIntegrator, dt: f32) {
    motion.decay();
    motion.integrate(dt);
}

// ============================================================================
// Impulses
// ============================================================================

#[test]
fn impulses_match_commands() {
    let mut motion = MotionIntegrator::new(MotionParams::default());

    motion.apply_impulse(Command::MoveForward);
    assert!(approx(motion.velocity.forward, 1.0));
    motion.apply_impulse(Command::MoveBackward);
    motion.apply_impulse(Command::MoveBackward);
    assert!(approx(motion.velocity.forward, -1.0));

    motion.apply_impulse(Command::TurnLeft);
    assert!(approx(motion.velocity.angular, 0.0051));
    motion.apply_impulse(Command::TurnRight);
    assert!(approx(motion.velocity.angular, 0.0));

    motion.apply_impulse(Command::Jump);
    assert!(approx(motion.velocity.vertical, 2.0));
}

#[test]
fn gesture_has_no_impulse() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    motion.apply_impulse(Command::Gesture);
    assert_eq!(motion.velocity, walker::character::Velocity::default());
}

// ============================================================================
// Damping & Gravity
// ============================================================================

#[test]
fn damping_converges_without_sign_reversal() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    motion.velocity.forward = -3.0;
    motion.velocity.angular = 0.02;

    let mut last = motion.velocity;
    for _ in 0..500 {
        motion.decay();
        let v = motion.velocity;
        assert!(v.forward <= 0.0 && v.forward.abs() <= last.forward.abs());
        assert!(v.angular >= 0.0 && v.angular <= last.angular);
        last = v;
    }
    assert!(last.forward.abs() < 1e-9);
}

#[test]
fn gravity_is_per_frame() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    motion.velocity.vertical = 1.0;

    motion.decay();
    assert!(approx(motion.velocity.vertical, 0.9));
    // damping does not touch vertical velocity
    motion.decay();
    assert!(approx(motion.velocity.vertical, 0.8));
}

// ============================================================================
// Ground Clamp
// ============================================================================

#[test]
fn jump_arc_never_goes_below_ground() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    motion.apply_impulse(Command::Jump);

    let mut peak: f32 = 0.0;
    for _ in 0..200 {
        step(&mut motion, DT);
        assert!(motion.pose.position.y >= 0.0);
        peak = peak.max(motion.pose.position.y);
    }

    assert!(peak > 15.0, "peak {peak}");
    assert_eq!(motion.pose.position.y, 0.0);
    assert_eq!(motion.velocity.vertical, 0.0);
}

#[test]
fn grounded_actor_stays_put() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    for _ in 0..10 {
        step(&mut motion, DT);
        assert_eq!(motion.pose.position, Vec3::ZERO);
        assert_eq!(motion.velocity.vertical, 0.0);
    }
}

// ============================================================================
// Settled-to-rest predicate
// ============================================================================

#[test]
fn grounded_actor_at_rest_is_settled() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    motion.decay();
    // gravity leaves vertical velocity negative until the clamp runs
    assert!(motion.velocity.vertical < 0.0);
    assert!(motion.is_settled());
}

#[test]
fn moving_actor_is_not_settled() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    motion.apply_impulse(Command::MoveForward);
    motion.decay();
    assert!(!motion.is_settled());

    let mut turning = MotionIntegrator::new(MotionParams::default());
    turning.apply_impulse(Command::TurnLeft);
    turning.decay();
    assert!(!turning.is_settled());
}

#[test]
fn forward_velocity_settles_within_bounded_frames() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    motion.apply_impulse(Command::MoveForward);

    let frames = (0..1000)
        .find(|_| {
            motion.decay();
            motion.is_settled()
        })
        .expect("never settled");

    // 0.95^n < 0.01 first holds at n = 90
    assert_eq!(frames + 1, 90);
    motion.settle();
    assert_eq!(motion.velocity.forward, 0.0);
}

// ============================================================================
// Heading & Planar Integration
// ============================================================================

#[test]
fn forward_motion_follows_heading() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    motion.pose.heading = FRAC_PI_2;
    motion.velocity.forward = 2.0;

    motion.integrate(0.5);
    assert!(approx(motion.pose.position.x, 1.0));
    assert!(approx(motion.pose.position.z, 0.0));
}

#[test]
fn heading_integrates_angular_velocity_per_frame() {
    let mut motion = MotionIntegrator::new(MotionParams::default());
    motion.apply_impulse(Command::TurnLeft);

    motion.integrate(DT);
    assert!(approx(motion.pose.heading, 0.0051));
    motion.integrate(0.5);
    assert!(approx(motion.pose.heading, 0.0102));
}

#[test]
fn params_are_plain_fields() {
    let params = MotionParams {
        gravity: 0.0,
        ..MotionParams::default()
    };
    let mut motion = MotionIntegrator::new(params);
    motion.apply_impulse(Command::Jump);
    step(&mut motion, DT);
    step(&mut motion, DT);
    assert!(approx(motion.pose.position.y, 4.0));
}
