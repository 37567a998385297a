//! Per-frame draw list and the backend interface that consumes it.
//!
//! The simulation builds a [`FrameSnapshot`] after every tick; a
//! [`RenderBackend`] replays it. Nothing in here touches a GPU API.

use crate::camera::CameraUniform;
use crate::mesh::{MeshData, MeshHandle};
use crate::vertex::ParticleVertex;
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3, Vec4};

/// Deep-space clear color.
pub const CLEAR_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.1, 1.0);

/// Single point light plus ambient term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub ambient: Vec3,
}

impl Light {
    pub const SCENE: Self = Self {
        position: Vec3::new(100.0, 100.0, 100.0),
        color: Vec3::new(1.0, 1.0, 0.9),
        ambient: Vec3::new(0.1, 0.1, 0.2),
    };
}

impl Default for Light {
    fn default() -> Self {
        Self::SCENE
    }
}

/// Blinn-Phong material inputs for one mesh draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialUniforms {
    /// Inverse-transpose of the model's upper 3×3.
    pub normal_matrix: Mat3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl MaterialUniforms {
    /// Dull rock: gray specular, shininess 32.
    pub fn rock(model: &Mat4, diffuse: Vec3) -> Self {
        Self {
            normal_matrix: engine_core::normal_matrix(model),
            diffuse,
            specular: Vec3::splat(0.2),
            shininess: 32.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDraw {
    pub mesh: MeshHandle,
    pub model: Mat4,
    pub uniforms: MaterialUniforms,
}

/// Per-draw uniform block for the lit mesh pipeline (std140 layout).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MeshUniformsRaw {
    pub model: [[f32; 4]; 4],
    /// Normal matrix columns, each padded to a vec4.
    pub normal: [[f32; 4]; 3],
    pub diffuse: [f32; 4],
    /// Specular RGB with shininess in w.
    pub specular: [f32; 4],
}

impl From<&MeshDraw> for MeshUniformsRaw {
    fn from(draw: &MeshDraw) -> Self {
        let n = draw.uniforms.normal_matrix;
        Self {
            model: draw.model.to_cols_array_2d(),
            normal: [
                n.x_axis.extend(0.0).into(),
                n.y_axis.extend(0.0).into(),
                n.z_axis.extend(0.0).into(),
            ],
            diffuse: draw.uniforms.diffuse.extend(1.0).into(),
            specular: draw.uniforms.specular.extend(draw.uniforms.shininess).into(),
        }
    }
}

/// Everything needed to draw one frame, in draw order: clear, stars, meshes, particles.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub clear_color: Vec4,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub light: Light,
    /// Background stars as point sprites.
    pub stars: Vec<ParticleVertex>,
    pub meshes: Vec<MeshDraw>,
    /// Exhaust then explosion particles, blended over the meshes.
    pub particles: Vec<ParticleVertex>,
}

impl FrameSnapshot {
    pub fn new(view: Mat4, projection: Mat4, camera_position: Vec3) -> Self {
        Self {
            clear_color: CLEAR_COLOR,
            view,
            projection,
            camera_position,
            light: Light::SCENE,
            stars: Vec::new(),
            meshes: Vec::new(),
            particles: Vec::new(),
        }
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        CameraUniform::from_matrices(self.view, self.projection, self.camera_position)
    }

    /// Draw calls [`submit`] will issue, clear excluded.
    pub fn draw_call_count(&self) -> usize {
        self.meshes.len() + usize::from(!self.stars.is_empty()) + usize::from(!self.particles.is_empty())
    }
}

/// A graphics API that can replay a [`FrameSnapshot`].
pub trait RenderBackend {
    /// Make `data` available under `handle`. Called once per handle before drawing.
    fn upload_mesh(&mut self, handle: MeshHandle, data: &MeshData);

    fn resize(&mut self, width: u32, height: u32);

    fn clear(&mut self, color: Vec4);

    fn draw_mesh(&mut self, camera: &CameraUniform, light: &Light, draw: &MeshDraw);

    /// Draw one batch of point sprites. Never called with an empty slice.
    fn draw_particles(&mut self, camera: &CameraUniform, particles: &[ParticleVertex]);
}

/// Upload every scene mesh to `backend`.
pub fn upload_meshes<B: RenderBackend + ?Sized>(backend: &mut B) {
    for handle in MeshHandle::ALL {
        let data = handle.build();
        log::debug!(
            "Uploading {:?} mesh ({} vertices, {} indices)",
            handle,
            data.vertices.len(),
            data.index_count()
        );
        backend.upload_mesh(handle, &data);
    }
}

/// Replay `frame` on `backend`.
pub fn submit<B: RenderBackend + ?Sized>(backend: &mut B, frame: &FrameSnapshot) {
    let camera = frame.camera_uniform();
    backend.clear(frame.clear_color);
    if !frame.stars.is_empty() {
        backend.draw_particles(&camera, &frame.stars);
    }
    for draw in &frame.meshes {
        backend.draw_mesh(&camera, &frame.light, draw);
    }
    if !frame.particles.is_empty() {
        backend.draw_particles(&camera, &frame.particles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Upload(MeshHandle),
        Clear,
        Mesh(MeshHandle),
        Particles(usize),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl RenderBackend for Recorder {
        fn upload_mesh(&mut self, handle: MeshHandle, _data: &MeshData) {
            self.calls.push(Call::Upload(handle));
        }
        fn resize(&mut self, _width: u32, _height: u32) {}
        fn clear(&mut self, color: Vec4) {
            assert_eq!(color, CLEAR_COLOR);
            self.calls.push(Call::Clear);
        }
        fn draw_mesh(&mut self, _camera: &CameraUniform, light: &Light, draw: &MeshDraw) {
            assert_eq!(*light, Light::SCENE);
            self.calls.push(Call::Mesh(draw.mesh));
        }
        fn draw_particles(&mut self, _camera: &CameraUniform, particles: &[ParticleVertex]) {
            self.calls.push(Call::Particles(particles.len()));
        }
    }

    fn rock_at(x: f32) -> MeshDraw {
        let model = Mat4::from_translation(Vec3::new(x, 0.0, 0.0));
        MeshDraw {
            mesh: MeshHandle::Asteroid,
            model,
            uniforms: MaterialUniforms::rock(&model, Vec3::new(0.5, 0.4, 0.3)),
        }
    }

    #[test]
    fn submit_draws_stars_then_meshes_then_particles() {
        let mut frame = FrameSnapshot::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO);
        frame.stars = vec![ParticleVertex::new(Vec3::ZERO, 1.0, Vec4::ONE); 4];
        frame.meshes = vec![rock_at(1.0), rock_at(2.0)];
        frame.particles = vec![ParticleVertex::new(Vec3::ZERO, 2.0, Vec4::ONE)];

        let mut backend = Recorder::default();
        submit(&mut backend, &frame);
        assert_eq!(
            backend.calls,
            vec![
                Call::Clear,
                Call::Particles(4),
                Call::Mesh(MeshHandle::Asteroid),
                Call::Mesh(MeshHandle::Asteroid),
                Call::Particles(1),
            ]
        );
        assert_eq!(frame.draw_call_count(), 4);
    }

    #[test]
    fn empty_batches_are_skipped() {
        let frame = FrameSnapshot::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO);
        let mut backend = Recorder::default();
        submit(&mut backend, &frame);
        assert_eq!(backend.calls, vec![Call::Clear]);
        assert_eq!(frame.draw_call_count(), 0);
    }

    #[test]
    fn upload_covers_every_handle() {
        let mut backend = Recorder::default();
        upload_meshes(&mut backend);
        let uploaded: Vec<_> = MeshHandle::ALL.iter().map(|h| Call::Upload(*h)).collect();
        assert_eq!(backend.calls, uploaded);
    }

    #[test]
    fn rock_normal_matrix_undoes_uniform_scale() {
        let model = Mat4::from_scale(Vec3::splat(4.0));
        let m = MaterialUniforms::rock(&model, Vec3::ONE);
        let n = m.normal_matrix * Vec3::Y;
        assert!((n - Vec3::new(0.0, 0.25, 0.0)).length() < 1e-6);
        assert_eq!(m.shininess, 32.0);
    }

    #[test]
    fn raw_uniforms_pack_shininess_into_specular_w() {
        let draw = rock_at(3.0);
        let raw = MeshUniformsRaw::from(&draw);
        assert_eq!(std::mem::size_of::<MeshUniformsRaw>(), 144);
        assert_eq!(raw.model[3], [3.0, 0.0, 0.0, 1.0]);
        assert_eq!(raw.specular, [0.2, 0.2, 0.2, 32.0]);
        assert_eq!(raw.normal[1], [0.0, 1.0, 0.0, 0.0]);
    }
}
