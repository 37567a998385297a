//! Player craft flight model: thrust, boost, brake, drag and the first-person camera basis.

use std::f32::consts::FRAC_PI_2;

use engine_core::error::{ensure_factor, ensure_positive, ConfigError};
use engine_core::math::{clamp_length, decay, local_to_world, rotate_about_axis, EPSILON, WORLD_UP};
use engine_core::rng::{jitter, uniform};
use engine_core::time::REFERENCE_DT;
use engine_core::{InputIntent, Particle, ParticlePool, PoolConfig};
use glam::{Vec3, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Exhaust color while boosting.
const BOOST_EXHAUST: Vec4 = Vec4::new(0.0, 0.7, 1.0, 1.0);
/// Exhaust color under normal thrust.
const CRUISE_EXHAUST: Vec4 = Vec4::new(0.0, 0.4, 1.0, 0.8);
/// Per-axis jitter of the exhaust spawn point.
const EXHAUST_JITTER: f32 = 0.25;

/// Physical constants of the craft. Fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftConfig {
    pub mass: f32,
    pub max_speed: f32,
    pub thrust_power: f32,
    pub brake_power: f32,
    pub boost_multiplier: f32,
    /// Linear velocity multiplier per reference tick.
    pub drag: f32,
    /// Angular velocity multiplier per reference tick.
    pub angular_drag: f32,
    /// Collision sphere radius.
    pub radius: f32,
    pub max_health: f32,
    /// Distance behind the craft where exhaust appears.
    pub exhaust_offset: f32,
    pub exhaust: PoolConfig,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            max_speed: 50.0,
            thrust_power: 30.0,
            brake_power: 20.0,
            boost_multiplier: 2.0,
            drag: 0.95,
            angular_drag: 0.9,
            radius: 2.0,
            max_health: 100.0,
            exhaust_offset: 2.0,
            exhaust: PoolConfig::exhaust(),
        }
    }
}

impl CraftConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("mass", self.mass)?;
        ensure_positive("max_speed", self.max_speed)?;
        ensure_positive("radius", self.radius)?;
        ensure_positive("max_health", self.max_health)?;
        ensure_positive("thrust_power", self.thrust_power)?;
        ensure_positive("brake_power", self.brake_power)?;
        ensure_positive("boost_multiplier", self.boost_multiplier)?;
        ensure_factor("drag", self.drag)?;
        ensure_factor("angular_drag", self.angular_drag)?;
        ensure_positive("exhaust_offset", self.exhaust_offset)?;
        self.exhaust.validate("exhaust")
    }
}

/// Orthonormal first-person camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: -Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

impl CameraBasis {
    /// Derive the basis from `(pitch, yaw, roll)`.
    ///
    /// Roll turns the right/up pair about forward after they are built from
    /// pitch and yaw, so the frame stays orthonormal.
    pub fn from_rotation(position: Vec3, rotation: Vec3) -> Self {
        let (pitch, yaw, roll) = (rotation.x, rotation.y, rotation.z);

        let forward = Vec3::new(pitch.cos() * yaw.sin(), -pitch.sin(), -pitch.cos() * yaw.cos());

        let cross = forward.cross(WORLD_UP);
        // Looking straight up or down: use the limit of the cross product.
        let right = if cross.length_squared() > EPSILON * EPSILON {
            cross.normalize()
        } else {
            Vec3::new(yaw.cos(), 0.0, yaw.sin())
        };
        let up = right.cross(forward);

        Self {
            position,
            forward,
            right: rotate_about_axis(right, forward, roll),
            up: rotate_about_axis(up, forward, roll),
        }
    }
}

/// State published after each craft update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraftUpdate {
    pub position: Vec3,
    pub rotation: Vec3,
    pub camera: CameraBasis,
    pub speed: f32,
}

/// The player craft.
#[derive(Debug, Clone)]
pub struct CraftDynamics {
    config: CraftConfig,
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    /// (pitch, yaw, roll) in radians.
    rotation: Vec3,
    angular_velocity: Vec3,
    health: f32,
    speed: f32,
    boosting: bool,
    braking: bool,
    camera: CameraBasis,
    exhaust: ParticlePool,
}

impl CraftDynamics {
    /// Build a craft at rest at the origin. Fails on invalid constants.
    pub fn new(config: CraftConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            rotation: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            health: config.max_health,
            speed: 0.0,
            boosting: false,
            braking: false,
            camera: CameraBasis::default(),
            exhaust: ParticlePool::new(config.exhaust),
        })
    }

    /// Advance the craft by `dt` seconds under `intent`.
    ///
    /// Exhaust is placed from the camera of the previous tick, so it trails the craft by one step.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, intent: &InputIntent, rng: &mut R) -> CraftUpdate {
        if self.handle_input(intent) {
            self.emit_exhaust(rng);
        }
        self.integrate(dt);
        self.camera = CameraBasis::from_rotation(self.position, self.rotation);

        CraftUpdate {
            position: self.position,
            rotation: self.rotation,
            camera: self.camera,
            speed: self.speed,
        }
    }

    /// Apply mouse look and accumulate thrust/brake forces. Returns true if the engine is firing.
    fn handle_input(&mut self, intent: &InputIntent) -> bool {
        self.rotation.y -= intent.yaw_delta;
        self.rotation.x -= intent.pitch_delta;
        self.rotation.x = self.rotation.x.clamp(-FRAC_PI_2, FRAC_PI_2);

        self.boosting = intent.boost;
        self.braking = intent.brake;

        let thrust = intent.local_thrust().normalize_or_zero();
        let world_thrust = local_to_world(thrust, self.rotation);

        let mut power = self.config.thrust_power;
        if self.boosting {
            power *= self.config.boost_multiplier;
        }
        self.acceleration += world_thrust * (power / self.config.mass);

        if self.braking {
            let brake = -self.velocity.normalize_or_zero() * (self.config.brake_power / self.config.mass);
            self.acceleration += brake;
        }

        intent.has_thrust() || self.boosting
    }

    /// Semi-implicit Euler step.
    fn integrate(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.velocity *= decay(self.config.drag, dt, REFERENCE_DT);
        self.velocity = clamp_length(self.velocity, self.config.max_speed);
        self.position += self.velocity * dt;

        self.angular_velocity *= decay(self.config.angular_drag, dt, REFERENCE_DT);
        self.rotation += self.angular_velocity * dt;
        self.rotation.x = self.rotation.x.clamp(-FRAC_PI_2, FRAC_PI_2);

        self.acceleration = Vec3::ZERO;
        self.speed = self.velocity.length();
    }

    fn emit_exhaust<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let back = -self.camera.forward;
        let position = self.position + back * self.config.exhaust_offset + jitter(rng, EXHAUST_JITTER);
        let velocity = back * (20.0 + uniform(rng, 0.0, 10.0));
        let color = if self.boosting { BOOST_EXHAUST } else { CRUISE_EXHAUST };
        let size = uniform(rng, 4.0, 12.0);
        let life = uniform(rng, 0.5, 1.0);
        self.exhaust.spawn(Particle::new(position, velocity, color, size, life));
    }

    /// Age the exhaust particles.
    pub fn age_exhaust(&mut self, dt: f32) {
        self.exhaust.update(dt);
    }

    /// Subtract `amount` from health. Not clamped: several hits in one tick add up.
    pub fn apply_damage(&mut self, amount: f32) {
        self.health -= amount.max(0.0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn camera(&self) -> &CameraBasis {
        &self.camera
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    pub fn is_braking(&self) -> bool {
        self.braking
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    pub fn config(&self) -> &CraftConfig {
        &self.config
    }

    pub fn exhaust(&self) -> &ParticlePool {
        &self.exhaust
    }
}
