//! glTF model loading: joint hierarchy and the recognised animation clips.

use std::collections::VecDeque;
use std::path::Path;

use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackData, TrackMeta};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::animation::values::Interpolatable;
use crate::assets::LoadedModel;
use crate::character::registry::ClipName;
use crate::errors::{Result, WalkerError};
use crate::scene::{Joint, Rig, Transform};

pub struct GltfLoader;

impl GltfLoader {
    /// Reads and parses a `.gltf` / `.glb` file. External buffers resolve
    /// relative to the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<LoadedModel> {
        let path = path.as_ref();
        log::info!("Loading glTF model from: {}", path.display());
        let bytes = std::fs::read(path)?;
        Self::load_from_slice(&bytes, path.parent())
    }

    /// Parses a glTF document held in memory. Data URIs and GLB binary
    /// chunks need no `base`.
    pub fn load_from_slice(bytes: &[u8], base: Option<&Path>) -> Result<LoadedModel> {
        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
        let buffers = gltf::import_buffers(&document, base, blob)?;

        let rig = Self::load_rig(&document);
        let clips = Self::load_animations(&document, &buffers)?;

        if !clips.iter().any(|(name, _)| *name == ClipName::Idle) {
            return Err(WalkerError::MissingClip(ClipName::Idle.as_str()));
        }

        Ok(LoadedModel { rig, clips })
    }

    /// Flattens the node tree of the default scene (or every parentless node
    /// when there is no scene) breadth-first, so parents precede children.
    /// Each node appears at most once.
    fn load_rig(document: &gltf::Document) -> Rig {
        let roots: Vec<gltf::Node> = match document.default_scene().or_else(|| document.scenes().next()) {
            Some(scene) => scene.nodes().collect(),
            None => {
                let mut has_parent = vec![false; document.nodes().len()];
                for node in document.nodes() {
                    for child in node.children() {
                        has_parent[child.index()] = true;
                    }
                }
                document.nodes().filter(|n| !has_parent[n.index()]).collect()
            }
        };

        let mut joints = Vec::with_capacity(document.nodes().len());
        let mut visited = vec![false; document.nodes().len()];
        let mut queue: VecDeque<(gltf::Node, Option<usize>)> =
            roots.into_iter().map(|n| (n, None)).collect();

        while let Some((node, parent)) = queue.pop_front() {
            // A node reachable twice (shared child or cycle) joins the rig once.
            if std::mem::replace(&mut visited[node.index()], true) {
                log::warn!("Node {} is reachable more than once; keeping its first parent", node.index());
                continue;
            }

            let (t, r, s) = node.transform().decomposed();
            let bind = Transform {
                position: Vec3::from_array(t),
                rotation: Quat::from_array(r),
                scale: Vec3::from_array(s),
            };

            let index = joints.len();
            joints.push(Joint {
                name: node_name(&node),
                parent,
                bind,
                local: bind,
            });

            for child in node.children() {
                queue.push_back((child, Some(index)));
            }
        }

        Rig::new(joints)
    }

    fn load_animations(
        document: &gltf::Document,
        buffers: &[gltf::buffer::Data],
    ) -> Result<Vec<(ClipName, AnimationClip)>> {
        let mut clips = Vec::new();

        for anim in document.animations() {
            let name = anim.name().unwrap_or("anim");
            let Some(clip_name) = ClipName::from_name(name) else {
                log::debug!("Discarding unrecognised clip '{name}'");
                continue;
            };

            let mut tracks = Vec::new();

            for channel in anim.channels() {
                let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
                let target = channel.target();
                let joint_name = node_name(&target.node());

                let Some(inputs) = reader.read_inputs() else {
                    return Err(WalkerError::GltfError(format!(
                        "clip '{name}': channel on '{joint_name}' has no keyframe times"
                    )));
                };
                let times: Vec<f32> = inputs.collect();

                let interpolation = match channel.sampler().interpolation() {
                    gltf::animation::Interpolation::Linear => InterpolationMode::Linear,
                    gltf::animation::Interpolation::Step => InterpolationMode::Step,
                    gltf::animation::Interpolation::CubicSpline => InterpolationMode::CubicSpline,
                };

                let (target_path, data) = match reader.read_outputs() {
                    Some(gltf::animation::util::ReadOutputs::Translations(iter)) => (
                        TargetPath::Translation,
                        TrackData::Vector3(checked_track(
                            name,
                            &joint_name,
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )?),
                    ),
                    Some(gltf::animation::util::ReadOutputs::Rotations(iter)) => (
                        TargetPath::Rotation,
                        TrackData::Quaternion(checked_track(
                            name,
                            &joint_name,
                            times,
                            iter.into_f32().map(Quat::from_array).collect(),
                            interpolation,
                        )?),
                    ),
                    Some(gltf::animation::util::ReadOutputs::Scales(iter)) => (
                        TargetPath::Scale,
                        TrackData::Vector3(checked_track(
                            name,
                            &joint_name,
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )?),
                    ),
                    Some(gltf::animation::util::ReadOutputs::MorphTargetWeights(_)) => {
                        log::debug!("clip '{name}': skipping morph weights on '{joint_name}'");
                        continue;
                    }
                    None => {
                        return Err(WalkerError::GltfError(format!(
                            "clip '{name}': channel on '{joint_name}' has no output values"
                        )));
                    }
                };

                tracks.push(Track {
                    meta: TrackMeta {
                        node_name: joint_name,
                        target: target_path,
                    },
                    data,
                });
            }

            clips.push((clip_name, AnimationClip::new(name, tracks)));
        }

        Ok(clips)
    }
}

/// Builds a track, rejecting a sampler whose output count does not match its
/// keyframe times.
fn checked_track<T: Interpolatable>(
    clip: &str,
    joint: &str,
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: InterpolationMode,
) -> Result<KeyframeTrack<T>> {
    let track = KeyframeTrack::new(times, values, interpolation);
    if !track.is_well_formed() {
        return Err(WalkerError::GltfError(format!(
            "clip '{clip}': channel on '{joint}' has {} output values for {} keyframes (expected {})",
            track.values.len(),
            track.times.len(),
            track.expected_value_count(),
        )));
    }
    Ok(track)
}

/// Joint name used for binding; unnamed nodes get a stable positional name.
fn node_name(node: &gltf::Node) -> String {
    node.name()
        .map_or_else(|| format!("Node_{}", node.index()), ToString::to_string)
}
