//! CPU-side line geometry: the ground grid, the actor's bones and its heading.
//!
//! Rebuilt every frame into one vertex list drawn as a `LineList`.

use bytemuck::{Pod, Zeroable};
use glam::{Affine3A, Vec3};

use crate::character::ActorPose;
use crate::renderer::settings::GridSettings;
use crate::scene::Rig;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub const BONE_COLOR: [f32; 4] = [0.85, 0.35, 0.1, 1.0];
pub const HEADING_COLOR: [f32; 4] = [0.1, 0.3, 0.9, 1.0];

/// Pairs of vertices, one pair per segment.
#[derive(Debug, Default, Clone)]
pub struct LineBatch {
    vertices: Vec<LineVertex>,
}

impl LineBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    #[must_use]
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len() / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        self.vertices.push(LineVertex {
            position: a.to_array(),
            color,
        });
        self.vertices.push(LineVertex {
            position: b.to_array(),
            color,
        });
    }

    /// `divisions + 1` lines along each axis, centred on the origin.
    pub fn push_grid(&mut self, grid: &GridSettings) {
        let half = grid.size * 0.5;
        let step = grid.size / grid.divisions.max(1) as f32;

        for i in 0..=grid.divisions {
            let k = -half + i as f32 * step;
            self.push_line(Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k), grid.color);
            self.push_line(Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half), grid.color);
        }
    }

    /// One segment from every joint to its parent, in the current pose.
    pub fn push_rig(&mut self, rig: &Rig, root: Affine3A, color: [f32; 4]) {
        let world = rig.world_matrices(root);

        for (joint, matrix) in rig.joints().iter().zip(&world) {
            let Some(parent) = joint.parent else {
                continue;
            };
            let from = Vec3::from(world[parent].translation);
            let to = Vec3::from(matrix.translation);
            self.push_line(from, to, color);
        }
    }

    /// An arrow on the ground pointing where the actor faces.
    pub fn push_heading(&mut self, pose: &ActorPose, length: f32, color: [f32; 4]) {
        let base = Vec3::new(pose.position.x, 0.0, pose.position.z);
        let forward = pose.forward();
        let tip = base + forward * length;
        let side = Vec3::Y.cross(forward) * (length * 0.2);
        let back = tip - forward * (length * 0.3);

        self.push_line(base, tip, color);
        self.push_line(tip, back + side, color);
        self.push_line(tip, back - side, color);
    }
}
