//! Vector and orientation helpers shared by the simulation crates.

use glam::{Mat3, Quat, Vec3};

/// World up axis used for camera basis construction.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Tolerance below which a vector is treated as zero-length.
pub const EPSILON: f32 = 1e-6;

/// Normalize `v`, returning the zero vector for zero-length input.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Scale `v` down so its length does not exceed `max_len`.
pub fn clamp_length(v: Vec3, max_len: f32) -> Vec3 {
    let len = v.length();
    if len > max_len && len > EPSILON {
        v * (max_len / len)
    } else {
        v
    }
}

/// Rotation taking craft-local vectors to world space:
/// yaw about world Y, then pitch about local X, then roll about local Z.
pub fn yaw_pitch_roll(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch) * Quat::from_rotation_z(roll)
}

/// Rotate a local-space vector into world space using Euler angles `(pitch, yaw, roll)`.
pub fn local_to_world(local: Vec3, rotation: Vec3) -> Vec3 {
    yaw_pitch_roll(rotation.x, rotation.y, rotation.z) * local
}

/// Rotate `v` by `angle` radians about the unit `axis`.
pub fn rotate_about_axis(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    if angle == 0.0 {
        return v;
    }
    Quat::from_axis_angle(axis, angle) * v
}

/// Normal matrix (inverse transpose of the upper 3x3) for a model matrix.
pub fn normal_matrix(model: &glam::Mat4) -> Mat3 {
    let m = Mat3::from_mat4(*model);
    if m.determinant().abs() < EPSILON {
        return Mat3::IDENTITY;
    }
    m.inverse().transpose()
}

/// Exponential decay of a per-tick `factor` rescaled to an arbitrary `dt`.
///
/// `factor` is the multiplier applied once per `reference_dt` seconds.
#[inline]
pub fn decay(factor: f32, dt: f32, reference_dt: f32) -> f32 {
    if dt <= 0.0 {
        return 1.0;
    }
    if factor >= 1.0 {
        return factor;
    }
    factor.powf(dt / reference_dt)
}
