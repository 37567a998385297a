//! Euler-angle transforms for streamed objects and their model matrices.

use glam::{Mat4, Vec3};

/// Position, per-axis Euler rotation (radians) and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for EulerTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl EulerTransform {
    pub fn new(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Model matrix: translate, then rotate X, Y, Z, then scale.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_matrix_places_origin_at_position() {
        let t = EulerTransform::new(Vec3::new(5.0, -2.0, 7.0), Vec3::new(0.3, 1.1, -0.4), 3.0);
        let p = t.to_matrix().transform_point3(Vec3::ZERO);
        assert!((p - t.position).length() < 1e-5);
    }

    #[test]
    fn model_matrix_applies_uniform_scale() {
        let t = EulerTransform::new(Vec3::ZERO, Vec3::new(0.7, 0.2, 1.9), 4.0);
        let p = t.to_matrix().transform_point3(Vec3::X);
        assert!((p.length() - 4.0).abs() < 1e-4);
    }
}
