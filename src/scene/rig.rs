//! Joint hierarchy driven by the animation mixer.

use glam::Affine3A;

use crate::scene::transform::Transform;

#[derive(Debug, Clone)]
pub struct Joint {
    pub name: String,
    /// Index of the parent joint; always smaller than this joint's index.
    pub parent: Option<usize>,
    /// Rest pose, restored where no action contributes.
    pub bind: Transform,
    /// Pose written by the mixer each frame.
    pub local: Transform,
}

/// Flat, parent-before-child list of joints.
#[derive(Debug, Clone, Default)]
pub struct Rig {
    joints: Vec<Joint>,
}

impl Rig {
    /// Builds a rig from joints in parent-before-child order.
    ///
    /// A joint whose parent index is not smaller than its own is treated as a root.
    #[must_use]
    pub fn new(mut joints: Vec<Joint>) -> Self {
        for (index, joint) in joints.iter_mut().enumerate() {
            if joint.parent.is_some_and(|parent| parent >= index) {
                log::warn!("Joint '{}' listed before its parent, treating it as a root", joint.name);
                joint.parent = None;
            }
        }
        Self { joints }
    }

    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|j| j.name == name)
    }

    #[must_use]
    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    pub fn joint_mut(&mut self, index: usize) -> Option<&mut Joint> {
        self.joints.get_mut(index)
    }

    /// World transform of every joint, with `root` applied above the rig's roots.
    #[must_use]
    pub fn world_matrices(&self, root: Affine3A) -> Vec<Affine3A> {
        let mut world: Vec<Affine3A> = Vec::with_capacity(self.joints.len());
        for joint in &self.joints {
            let parent = joint.parent.map_or(root, |p| world[p]);
            world.push(parent * joint.local.local_matrix());
        }
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn joint(name: &str, parent: Option<usize>, position: Vec3) -> Joint {
        let t = Transform {
            position,
            ..Transform::IDENTITY
        };
        Joint {
            name: name.to_string(),
            parent,
            bind: t,
            local: t,
        }
    }

    #[test]
    fn world_matrices_chain_parents() {
        let rig = Rig::new(vec![
            joint("Hips", None, Vec3::new(0.0, 1.0, 0.0)),
            joint("Spine", Some(0), Vec3::new(0.0, 0.5, 0.0)),
        ]);
        let world = rig.world_matrices(Affine3A::from_translation(Vec3::new(2.0, 0.0, 0.0)));
        assert!(world[1].translation.abs_diff_eq(Vec3::new(2.0, 1.5, 0.0).into(), 1e-6));
    }

    #[test]
    fn forward_parent_reference_becomes_root() {
        let rig = Rig::new(vec![joint("A", Some(1), Vec3::ZERO), joint("B", None, Vec3::ZERO)]);
        assert_eq!(rig.joints()[0].parent, None);
        assert_eq!(rig.find("B"), Some(1));
    }
}
