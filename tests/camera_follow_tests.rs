//! Camera Follow Tests
//!
//! Tests for:
//! - Chase placement from the actor pose
//! - Perspective camera placement and projection

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec3, Vec4Swizzles};

use walker::character::{ActorPose, FollowParams, follow_placement};
use walker::scene::Camera;

fn close(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, 1e-4)
}

// ============================================================================
// follow_placement
// ============================================================================

#[test]
fn camera_sits_behind_and_above() {
    let pose = ActorPose {
        position: Vec3::new(3.0, 0.0, 4.0),
        heading: 0.0,
    };
    let (eye, target) = follow_placement(&pose, &FollowParams::default());

    assert!(close(eye, Vec3::new(3.0, 8.0, -16.0)), "eye {eye}");
    assert!(close(target, Vec3::new(3.0, 3.0, 4.0)), "target {target}");
}

#[test]
fn camera_swings_with_heading() {
    let pose = ActorPose {
        position: Vec3::ZERO,
        heading: FRAC_PI_2,
    };
    let (eye, _) = follow_placement(&pose, &FollowParams::default());
    // facing +X, so the camera is on -X
    assert!(close(eye, Vec3::new(-20.0, 8.0, 0.0)), "eye {eye}");

    let turned = ActorPose { heading: PI, ..pose };
    let (eye, _) = follow_placement(&turned, &FollowParams::default());
    assert!(close(eye, Vec3::new(0.0, 8.0, 20.0)), "eye {eye}");
}

#[test]
fn camera_height_ignores_jump_but_target_does_not() {
    let pose = ActorPose {
        position: Vec3::new(0.0, 5.0, 0.0),
        heading: 0.0,
    };
    let (eye, target) = follow_placement(&pose, &FollowParams::default());

    assert!((eye.y - 8.0).abs() < 1e-5);
    assert!((target.y - 8.0).abs() < 1e-5);
}

#[test]
fn custom_follow_params() {
    let params = FollowParams {
        distance: 5.0,
        height: 2.0,
        look_at_lift: 1.0,
    };
    let (eye, target) = follow_placement(&ActorPose::default(), &params);

    assert!(close(eye, Vec3::new(0.0, 2.0, -5.0)));
    assert!(close(target, Vec3::new(0.0, 1.0, 0.0)));
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn placed_camera_projects_target_to_screen_centre() {
    let mut camera = Camera::new_perspective(45.0, 16.0 / 9.0, 0.25, 100.0);
    let target = Vec3::new(0.0, 2.0, 0.0);
    camera.place(Vec3::new(-5.0, 3.0, 10.0), target);

    let clip = camera.view_projection_matrix() * target.extend(1.0);
    let ndc = clip.xyz() / clip.w;

    assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4, "ndc {ndc}");
    assert!((0.0..=1.0).contains(&ndc.z));
}

#[test]
fn point_behind_far_plane_is_clipped() {
    let mut camera = Camera::new_perspective(45.0, 1.0, 0.25, 100.0);
    camera.place(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

    let clip = camera.view_projection_matrix() * Vec3::new(0.0, 0.0, -150.0).extend(1.0);
    assert!(clip.z / clip.w > 1.0);
}

#[test]
fn viewport_sets_aspect() {
    let mut camera = Camera::new_perspective(45.0, 1.0, 0.25, 100.0);
    camera.set_viewport(1920, 1080);
    assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-5);

    // a minimised window keeps the last aspect
    camera.set_viewport(0, 0);
    assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-5);
}
