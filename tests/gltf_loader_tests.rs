//! glTF Loader Tests
//!
//! Tests for:
//! - Rig extraction from the node tree (names, parents, bind pose)
//! - Clip filtering to the recognised names
//! - Track decoding (translation, rotation, step interpolation)
//! - Error paths: missing Idle clip, sampler count mismatch, malformed input,
//!   missing file
//! - Shared or cyclic node references
//! - Background loading through ModelLoad
//!
//! Documents are built in memory with a base64 data-URI buffer.

use std::time::{Duration, Instant};

use base64::Engine as _;
use glam::{Quat, Vec3};

use walker::animation::{InterpolationMode, TargetPath, TrackData};
use walker::assets::{GltfLoader, ModelLoad};
use walker::character::{ClipName, Simulation};
use walker::errors::WalkerError;

// ============================================================================
// Fixture
// ============================================================================

/// Two keyframe times, two translations and two rotations.
fn buffer_bytes() -> Vec<u8> {
    let floats: [f32; 16] = [
        // times
        0.0, 1.0, //
        // translations
        0.0, 1.0, 0.0, //
        0.0, 2.0, 0.0, //
        // rotations (x, y, z, w)
        0.0, 0.0, 0.0, 1.0, //
        0.0, 0.707_106_77, 0.0, 0.707_106_77,
    ];
    floats.iter().flat_map(|f| f.to_le_bytes()).collect()
}

const NODES: &str = r#"[
    { "name": "Root", "children": [1] },
    { "name": "Hips", "translation": [0.0, 1.0, 0.0], "children": [2] },
    { "translation": [0.0, 0.5, 0.0] }
  ]"#;

/// `animations` is spliced in as the glTF `animations` array.
fn document(animations: &str) -> Vec<u8> {
    document_with_nodes(NODES, animations)
}

/// Like [`document`] with a custom `nodes` array. Accessor 3 is a VEC3 output
/// holding a single value, one short of the two keyframe times.
fn document_with_nodes(nodes: &str, animations: &str) -> Vec<u8> {
    let data = base64::engine::general_purpose::STANDARD.encode(buffer_bytes());
    format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": {nodes},
  "buffers": [{{ "byteLength": 64, "uri": "data:application/octet-stream;base64,{data}" }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 8 }},
    {{ "buffer": 0, "byteOffset": 8, "byteLength": 24 }},
    {{ "buffer": 0, "byteOffset": 32, "byteLength": 32 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [1.0] }},
    {{ "bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC3" }},
    {{ "bufferView": 2, "componentType": 5126, "count": 2, "type": "VEC4" }},
    {{ "bufferView": 1, "componentType": 5126, "count": 1, "type": "VEC3" }}
  ],
  "animations": {animations}
}}"#
    )
    .into_bytes()
}

const IDLE: &str = r#"{
    "name": "Idle",
    "samplers": [{ "input": 0, "output": 1 }, { "input": 0, "output": 2 }],
    "channels": [
      { "sampler": 0, "target": { "node": 1, "path": "translation" } },
      { "sampler": 1, "target": { "node": 1, "path": "rotation" } }
    ]
  }"#;

const WALKING_STEP: &str = r#"{
    "name": "Walking",
    "samplers": [{ "input": 0, "output": 1, "interpolation": "STEP" }],
    "channels": [{ "sampler": 0, "target": { "node": 2, "path": "translation" } }]
  }"#;

const DANCE: &str = r#"{
    "name": "Dance",
    "samplers": [{ "input": 0, "output": 1 }],
    "channels": [{ "sampler": 0, "target": { "node": 1, "path": "translation" } }]
  }"#;

fn full_document() -> Vec<u8> {
    document(&format!("[{IDLE}, {DANCE}, {WALKING_STEP}]"))
}

// ============================================================================
// Rig
// ============================================================================

#[test]
fn rig_follows_node_tree() {
    let model = GltfLoader::load_from_slice(&full_document(), None).unwrap();
    let rig = &model.rig;

    assert_eq!(rig.len(), 3);
    let names: Vec<&str> = rig.joints().iter().map(|j| j.name.as_str()).collect();
    assert_eq!(names, ["Root", "Hips", "Node_2"]);

    let hips = rig.joint(1).unwrap();
    assert_eq!(hips.parent, Some(0));
    assert_eq!(hips.bind.position, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(hips.local, hips.bind);
    assert_eq!(rig.joint(2).unwrap().parent, Some(1));
}

#[test]
fn shared_child_joins_the_rig_once() {
    let nodes = r#"[
    { "name": "Root", "children": [1, 2] },
    { "name": "Hips", "children": [2] },
    { "name": "Spine" }
  ]"#;
    let model = GltfLoader::load_from_slice(&document_with_nodes(nodes, &format!("[{IDLE}]")), None).unwrap();

    let names: Vec<&str> = model.rig.joints().iter().map(|j| j.name.as_str()).collect();
    assert_eq!(names, ["Root", "Hips", "Spine"]);
    // breadth-first, so the first parent to reach it is Root
    assert_eq!(model.rig.joint(2).unwrap().parent, Some(0));
}

#[test]
fn cyclic_hierarchy_terminates() {
    let nodes = r#"[
    { "name": "Root", "children": [1] },
    { "name": "Hips", "children": [0] }
  ]"#;

    match GltfLoader::load_from_slice(&document_with_nodes(nodes, &format!("[{IDLE}]")), None) {
        Ok(model) => assert_eq!(model.rig.len(), 2),
        Err(err) => assert!(matches!(err, WalkerError::GltfError(_)), "got {err}"),
    }
}

#[test]
fn bind_pose_world_positions_accumulate() {
    let model = GltfLoader::load_from_slice(&full_document(), None).unwrap();
    let world = model.rig.world_matrices(glam::Affine3A::IDENTITY);

    let leaf = Vec3::from(world[2].translation);
    assert!(leaf.abs_diff_eq(Vec3::new(0.0, 1.5, 0.0), 1e-6));
}

// ============================================================================
// Clips
// ============================================================================

#[test]
fn only_recognised_clips_are_kept() {
    let model = GltfLoader::load_from_slice(&full_document(), None).unwrap();

    let names: Vec<ClipName> = model.clips.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, [ClipName::Idle, ClipName::Walking]);
}

#[test]
fn idle_tracks_decode() {
    let model = GltfLoader::load_from_slice(&full_document(), None).unwrap();
    let (_, idle) = &model.clips[0];

    assert_eq!(idle.name, "Idle");
    assert!((idle.duration - 1.0).abs() < 1e-6);
    assert_eq!(idle.tracks.len(), 2);

    let translation = &idle.tracks[0];
    assert_eq!(translation.meta.node_name, "Hips");
    assert_eq!(translation.meta.target, TargetPath::Translation);
    let TrackData::Vector3(track) = &translation.data else {
        panic!("expected a Vec3 track");
    };
    assert_eq!(track.interpolation, InterpolationMode::Linear);
    assert!(track.sample(0.5).unwrap().abs_diff_eq(Vec3::new(0.0, 1.5, 0.0), 1e-6));

    let rotation = &idle.tracks[1];
    assert_eq!(rotation.meta.target, TargetPath::Rotation);
    let TrackData::Quaternion(track) = &rotation.data else {
        panic!("expected a Quat track");
    };
    let end = track.sample(1.0).unwrap();
    assert!(end.angle_between(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)) < 1e-4);
}

#[test]
fn step_interpolation_and_unnamed_target() {
    let model = GltfLoader::load_from_slice(&full_document(), None).unwrap();
    let (_, walking) = &model.clips[1];

    let track = &walking.tracks[0];
    assert_eq!(track.meta.node_name, "Node_2");
    let TrackData::Vector3(track) = &track.data else {
        panic!("expected a Vec3 track");
    };
    assert_eq!(track.interpolation, InterpolationMode::Step);
    assert_eq!(track.sample(0.9).unwrap(), Vec3::new(0.0, 1.0, 0.0));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn missing_idle_is_an_error() {
    let bytes = document(&format!("[{WALKING_STEP}]"));
    let err = GltfLoader::load_from_slice(&bytes, None).unwrap_err();
    assert!(matches!(err, WalkerError::MissingClip("Idle")), "got {err}");
}

#[test]
fn short_sampler_output_is_rejected() {
    let short = r#"{
    "name": "Idle",
    "samplers": [{ "input": 0, "output": 3 }],
    "channels": [{ "sampler": 0, "target": { "node": 1, "path": "translation" } }]
  }"#;
    let err = GltfLoader::load_from_slice(&document(&format!("[{short}]")), None).unwrap_err();

    assert!(matches!(err, WalkerError::GltfError(_)), "got {err}");
    assert!(err.to_string().contains("1 output values for 2 keyframes"), "got {err}");
}

#[test]
fn cubic_spline_needs_three_values_per_key() {
    let cubic = r#"{
    "name": "Idle",
    "samplers": [{ "input": 0, "output": 1, "interpolation": "CUBICSPLINE" }],
    "channels": [{ "sampler": 0, "target": { "node": 1, "path": "translation" } }]
  }"#;
    let err = GltfLoader::load_from_slice(&document(&format!("[{cubic}]")), None).unwrap_err();
    assert!(matches!(err, WalkerError::GltfError(_)), "got {err}");
}

#[test]
fn rejected_model_never_reaches_the_simulation() {
    let short = r#"{
    "name": "Idle",
    "samplers": [{ "input": 0, "output": 3 }],
    "channels": [{ "sampler": 0, "target": { "node": 1, "path": "translation" } }]
  }"#;
    let result = GltfLoader::load_from_slice(&document(&format!("[{short}]")), None);

    let mut sim = Simulation::default();
    sim.begin_load(ModelLoad::resolved(result));
    for _ in 0..3 {
        sim.update(1.0 / 60.0);
    }
    assert!(sim.load_failed());
    assert!(sim.actor().is_none());
}

#[test]
fn malformed_input_is_a_gltf_error() {
    let err = GltfLoader::load_from_slice(b"{ not gltf", None).unwrap_err();
    assert!(matches!(err, WalkerError::GltfError(_)), "got {err}");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GltfLoader::load("does/not/exist.glb").unwrap_err();
    assert!(matches!(err, WalkerError::IoError(_)), "got {err}");
}

#[test]
fn load_reads_from_disk() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("walker-loader-{}.gltf", std::process::id()));
    std::fs::write(&path, full_document())?;

    let model = GltfLoader::load(&path);
    std::fs::remove_file(&path)?;

    assert_eq!(model.unwrap().clips.len(), 2);
    Ok(())
}

// ============================================================================
// ModelLoad
// ============================================================================

fn wait(load: &ModelLoad) -> walker::Result<walker::LoadedModel> {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(result) = load.poll() {
            return result;
        }
        assert!(Instant::now() < deadline, "load did not resolve");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn background_load_reports_failure() {
    let load = ModelLoad::spawn("does/not/exist.glb").unwrap();
    let result = wait(&load);
    assert!(matches!(result, Err(WalkerError::IoError(_))));
}

#[test]
fn background_load_resolves_once() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("walker-bg-{}.gltf", std::process::id()));
    std::fs::write(&path, full_document())?;

    let load = ModelLoad::spawn(path.clone()).unwrap();
    let model = wait(&load);
    std::fs::remove_file(&path)?;

    assert_eq!(model.unwrap().rig.len(), 3);
    Ok(())
}
