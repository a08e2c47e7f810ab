use std::sync::Arc;

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binding::{PropertyBinding, TargetPath};
use crate::animation::clip::AnimationClip;
use crate::animation::values::Interpolatable;
use crate::scene::{Rig, Transform};

new_key_type! {
    /// Handle to an action owned by an [`AnimationMixer`].
    pub struct ActionHandle;
}

/// Weighted running blend for one (joint, property) pair.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    value: TrackValue,
    weight: f32,
}

impl Accumulator {
    fn accumulate(&mut self, value: TrackValue, weight: f32) {
        let mix = weight / (self.weight + weight);
        self.value = match (self.value, value) {
            (TrackValue::Vector3(a), TrackValue::Vector3(b)) => {
                TrackValue::Vector3(Vec3::interpolate_linear(a, b, mix))
            }
            (TrackValue::Quaternion(a), TrackValue::Quaternion(b)) => {
                TrackValue::Quaternion(Quat::interpolate_linear(a, b, mix))
            }
            // Tracks bound to the same property always share a value type.
            (current, _) => current,
        };
        self.weight += weight;
    }
}

/// Resolves each track of `clip` to a joint of `rig` by name.
///
/// Tracks targeting joints the rig does not have are left unbound.
#[must_use]
pub fn bind_clip(rig: &Rig, clip: &AnimationClip) -> Vec<PropertyBinding> {
    clip.tracks
        .iter()
        .enumerate()
        .filter_map(|(track_index, track)| {
            rig.find(&track.meta.node_name).map(|joint| PropertyBinding {
                track_index,
                joint,
                target: track.meta.target,
            })
        })
        .collect()
}

/// Owns the actions of one rig, advances them and blends their poses.
#[derive(Default)]
pub struct AnimationMixer {
    actions: SlotMap<ActionHandle, AnimationAction>,
    scratch: FxHashMap<(usize, TargetPath), Accumulator>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an action for `clip`, bound against `rig`. The action is not playing yet.
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>, rig: &Rig) -> ActionHandle {
        let bindings = bind_clip(rig, &clip);
        if bindings.len() < clip.tracks.len() {
            log::debug!(
                "Clip '{}': {} of {} tracks bound",
                clip.name,
                bindings.len(),
                clip.tracks.len()
            );
        }

        let mut action = AnimationAction::new(clip);
        action.bindings = bindings;
        self.add_action(action)
    }

    pub fn add_action(&mut self, action: AnimationAction) -> ActionHandle {
        self.actions.insert(action)
    }

    #[must_use]
    pub fn action(&self, handle: ActionHandle) -> Option<&AnimationAction> {
        self.actions.get(handle)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut AnimationAction> {
        self.actions.get_mut(handle)
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionHandle, &AnimationAction)> {
        self.actions.iter()
    }

    pub fn stop_all_actions(&mut self) {
        for action in self.actions.values_mut() {
            action.stop();
        }
    }

    /// Advances every action by `dt` seconds and writes the blended pose to `rig`.
    ///
    /// Properties no action contributes to rest at the bind pose; a total
    /// weight below 1 is mixed with the bind pose.
    pub fn update(&mut self, dt: f32, rig: &mut Rig) {
        self.scratch.clear();

        for action in self.actions.values_mut() {
            action.update(dt);

            let weight = action.effective_weight();
            if weight <= 0.0 {
                continue;
            }

            for i in 0..action.bindings.len() {
                let binding = action.bindings[i];
                let Some(value) = action.sample_track(binding.track_index) else {
                    continue;
                };

                self.scratch
                    .entry((binding.joint, binding.target))
                    .and_modify(|acc| acc.accumulate(value, weight))
                    .or_insert(Accumulator { value, weight });
            }
        }

        for index in 0..rig.len() {
            if let Some(joint) = rig.joint_mut(index) {
                joint.local = joint.bind;
            }
        }

        for (&(joint_index, target), acc) in &self.scratch {
            let Some(joint) = rig.joint_mut(joint_index) else {
                continue;
            };
            apply(&mut joint.local, &joint.bind, target, acc);
        }
    }
}

fn apply(local: &mut Transform, bind: &Transform, target: TargetPath, acc: &Accumulator) {
    let w = acc.weight.min(1.0);
    match (target, acc.value) {
        (TargetPath::Translation, TrackValue::Vector3(v)) => {
            local.position = Vec3::interpolate_linear(bind.position, v, w);
        }
        (TargetPath::Scale, TrackValue::Vector3(v)) => {
            local.scale = Vec3::interpolate_linear(bind.scale, v, w);
        }
        (TargetPath::Rotation, TrackValue::Quaternion(q)) => {
            local.rotation = Quat::interpolate_linear(bind.rotation, q, w);
        }
        _ => {}
    }
}
