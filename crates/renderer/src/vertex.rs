//! Vertex records in the layout the GPU pipelines consume.

use bytemuck::{Pod, Zeroable};
use engine_core::Particle;
use glam::{Vec3, Vec4};

/// Lit mesh vertex: position and normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// One point sprite. The fragment stage fades alpha radially from the center.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    /// Point size in pixels.
    pub size: f32,
    pub color: [f32; 4],
}

impl ParticleVertex {
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    pub fn new(position: Vec3, size: f32, color: Vec4) -> Self {
        Self {
            position: position.into(),
            size,
            color: color.into(),
        }
    }
}

impl From<&Particle> for ParticleVertex {
    fn from(p: &Particle) -> Self {
        Self::new(p.position, p.size, p.color)
    }
}
