//! Background objects: point stars and tumbling asteroids.

use engine_core::rng::uniform;
use engine_core::EulerTransform;
use glam::{Vec3, Vec4};
use rand::Rng;
use std::f32::consts::TAU;

/// Star tints: white, blue-white, yellow, orange, red.
pub const STAR_PALETTE: [Vec4; 5] = [
    Vec4::new(1.0, 1.0, 1.0, 1.0),
    Vec4::new(0.8, 0.8, 1.0, 1.0),
    Vec4::new(1.0, 0.9, 0.7, 1.0),
    Vec4::new(1.0, 0.7, 0.4, 1.0),
    Vec4::new(1.0, 0.4, 0.4, 1.0),
];

/// A distant point star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub size: f32,
    /// Multiplier on the palette color, in `[0.2, 1.0)`.
    pub brightness: f32,
    pub color: Vec4,
}

impl Star {
    /// Star at `position` with random size, brightness and palette tint.
    pub fn random<R: Rng + ?Sized>(position: Vec3, rng: &mut R) -> Self {
        Self {
            position,
            size: uniform(rng, 1.0, 4.0),
            brightness: uniform(rng, 0.2, 1.0),
            color: STAR_PALETTE[rng.gen_range(0..STAR_PALETTE.len())],
        }
    }

    /// Palette color scaled by brightness; alpha untouched.
    pub fn display_color(&self) -> Vec4 {
        (self.color.truncate() * self.brightness).extend(self.color.w)
    }
}

/// A rock drifting in place and spinning about all three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub position: Vec3,
    /// Euler angles (radians) about X, Y, Z.
    pub rotation: Vec3,
    pub angular_velocity: Vec3,
    /// Render scale and collision radius.
    pub scale: f32,
    /// Diffuse RGB.
    pub color: Vec3,
}

impl Asteroid {
    /// Asteroid at `position` with random orientation, spin, scale and rocky color.
    pub fn random<R: Rng + ?Sized>(position: Vec3, rng: &mut R) -> Self {
        Self {
            position,
            rotation: Vec3::new(uniform(rng, 0.0, TAU), uniform(rng, 0.0, TAU), uniform(rng, 0.0, TAU)),
            angular_velocity: Vec3::new(
                uniform(rng, -0.25, 0.25),
                uniform(rng, -0.25, 0.25),
                uniform(rng, -0.25, 0.25),
            ),
            scale: uniform(rng, 2.0, 7.0),
            color: Vec3::new(
                0.4 + uniform(rng, 0.0, 0.3),
                0.3 + uniform(rng, 0.0, 0.3),
                0.2 + uniform(rng, 0.0, 0.3),
            ),
        }
    }

    /// Advance the tumble by `dt` seconds.
    pub fn spin(&mut self, dt: f32) {
        self.rotation += self.angular_velocity * dt;
    }

    pub fn transform(&self) -> EulerTransform {
        EulerTransform::new(self.position, self.rotation, self.scale)
    }
}
