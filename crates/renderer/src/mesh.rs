//! CPU mesh data and primitive generation.

use crate::vertex::Vertex;
use glam::Vec3;
use std::f32::consts::PI;

/// Largest segment count whose `(segments + 1)²` vertices fit 16-bit indices.
pub const MAX_SPHERE_SEGMENTS: u32 = 255;

/// Meshes the scene draws. Backends upload each one once and key it by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshHandle {
    /// Low-poly rock, sphere(1, 8).
    Asteroid,
    /// Smooth unit sphere, sphere(1, 12).
    Sphere,
    /// Unit cube.
    Cube,
}

impl MeshHandle {
    pub const ALL: [MeshHandle; 3] = [MeshHandle::Asteroid, MeshHandle::Sphere, MeshHandle::Cube];

    /// Generate the geometry behind this handle.
    pub fn build(self) -> MeshData {
        match self {
            MeshHandle::Asteroid => MeshData::sphere(1.0, 8),
            MeshHandle::Sphere => MeshData::sphere(1.0, 12),
            MeshHandle::Cube => MeshData::cube(1.0),
        }
    }
}

/// Mesh data before GPU upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Axis-aligned cube of edge `size` centered at the origin, flat-shaded.
    pub fn cube(size: f32) -> Self {
        let s = size / 2.0;
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            // Front
            ([0.0, 0.0, 1.0], [[-s, -s, s], [s, -s, s], [s, s, s], [-s, s, s]]),
            // Back
            ([0.0, 0.0, -1.0], [[-s, -s, -s], [-s, s, -s], [s, s, -s], [s, -s, -s]]),
            // Top
            ([0.0, 1.0, 0.0], [[-s, s, -s], [-s, s, s], [s, s, s], [s, s, -s]]),
            // Bottom
            ([0.0, -1.0, 0.0], [[-s, -s, -s], [s, -s, -s], [s, -s, s], [-s, -s, s]]),
            // Right
            ([1.0, 0.0, 0.0], [[s, -s, -s], [s, s, -s], [s, s, s], [s, -s, s]]),
            // Left
            ([-1.0, 0.0, 0.0], [[-s, -s, -s], [-s, -s, s], [-s, s, s], [-s, s, -s]]),
        ];

        let mut mesh = Self::new();
        for (normal, corners) in faces {
            let base = mesh.vertices.len() as u16;
            mesh.vertices.extend(corners.iter().map(|&p| Vertex::new(p, normal)));
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// Latitude/longitude sphere with `(segments + 1)²` vertices.
    ///
    /// `segments` is clamped to `1..=MAX_SPHERE_SEGMENTS`.
    pub fn sphere(radius: f32, segments: u32) -> Self {
        let clamped = segments.clamp(1, MAX_SPHERE_SEGMENTS);
        if clamped != segments {
            log::warn!("Sphere segments {} clamped to {}", segments, clamped);
        }
        let segments = clamped;

        let row = segments + 1;
        let mut mesh = Self {
            vertices: Vec::with_capacity((row * row) as usize),
            indices: Vec::with_capacity((segments * segments * 6) as usize),
        };

        for lat in 0..=segments {
            let theta = lat as f32 * PI / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for lon in 0..=segments {
                let phi = lon as f32 * 2.0 * PI / segments as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let normal = Vec3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
                mesh.vertices.push(Vertex::new((normal * radius).into(), normal.into()));

                if lat < segments && lon < segments {
                    let first = (lat * row + lon) as u16;
                    let second = first + row as u16;
                    mesh.indices.extend_from_slice(&[first, second, first + 1]);
                    mesh.indices.extend_from_slice(&[second, second + 1, first + 1]);
                }
            }
        }
        mesh
    }
}
