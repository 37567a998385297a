//! Particle lifecycle: spawn, age, fade, cap and reap.
//!
//! A [`ParticlePool`] is owned by exactly one emitter. The craft keeps a
//! private pool for its exhaust and the scene keeps one for explosions; both
//! share this implementation and differ only in their [`PoolConfig`].

use std::collections::VecDeque;

use glam::{Vec3, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::{ensure_factor, ConfigError};
use crate::math::decay;
use crate::rng::uniform;
use crate::time::REFERENCE_DT;

new_key_type! {
    /// Stable handle to a live particle.
    pub struct ParticleKey;
}

/// A single point sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// RGBA; alpha is rewritten from remaining life every update.
    pub color: Vec4,
    pub size: f32,
    /// Seconds left before the particle is reaped.
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// Particle with `life == max_life`.
    pub fn new(position: Vec3, velocity: Vec3, color: Vec4, size: f32, life: f32) -> Self {
        let life = life.max(0.0);
        Self {
            position,
            velocity,
            color,
            size: size.max(0.0),
            life,
            max_life: life,
        }
    }

    /// Remaining life as a fraction of the initial life.
    pub fn life_fraction(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn is_spent(&self, min_size: f32) -> bool {
        self.life <= 0.0 || self.size < min_size
    }
}

/// How particles in a pool age.
///
/// Factors are per-reference-tick (60 Hz) multipliers, rescaled to the
/// actual step with `factor^(dt / REFERENCE_DT)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayProfile {
    /// Velocity multiplier per reference tick (1.0 = no damping).
    pub velocity_damping: f32,
    /// Size multiplier per reference tick.
    pub size_decay: f32,
    /// Particles smaller than this are reaped (0.0 disables the check).
    pub min_size: f32,
}

impl DecayProfile {
    /// Engine exhaust: coasts, shrinks quickly.
    pub const EXHAUST: Self = Self {
        velocity_damping: 1.0,
        size_decay: 0.98,
        min_size: 0.1,
    };

    /// Explosion debris: slows down, shrinks slowly, lives until its life runs out.
    pub const EXPLOSION: Self = Self {
        velocity_damping: 0.98,
        size_decay: 0.99,
        min_size: 0.0,
    };
}

/// Pool capacity and aging profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum live particles; the oldest are evicted past this.
    pub capacity: usize,
    pub decay: DecayProfile,
}

impl PoolConfig {
    pub fn exhaust() -> Self {
        Self {
            capacity: 100,
            decay: DecayProfile::EXHAUST,
        }
    }

    pub fn explosion() -> Self {
        Self {
            capacity: 2000,
            decay: DecayProfile::EXPLOSION,
        }
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity { field });
        }
        ensure_factor("velocity_damping", self.decay.velocity_damping)?;
        ensure_factor("size_decay", self.decay.size_decay)?;
        if self.decay.min_size < 0.0 {
            return Err(ConfigError::InvalidRange {
                field: "min_size",
                min: self.decay.min_size,
                max: f32::INFINITY,
            });
        }
        Ok(())
    }
}

/// Bounded particle collection with oldest-first eviction.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: SlotMap<ParticleKey, Particle>,
    /// Live keys, oldest first.
    order: VecDeque<ParticleKey>,
    config: PoolConfig,
    evicted: u64,
}

impl ParticlePool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(config.capacity + 1),
            order: VecDeque::with_capacity(config.capacity + 1),
            config,
            evicted: 0,
        }
    }

    /// Add a particle, evicting the oldest ones if the pool is over capacity.
    pub fn spawn(&mut self, particle: Particle) -> ParticleKey {
        let key = self.slots.insert(particle);
        self.order.push_back(key);
        while self.slots.len() > self.config.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.slots.remove(oldest);
                    self.evicted += 1;
                }
                None => break,
            }
        }
        key
    }

    /// Burst of `count` particles at `origin` flying out in random directions.
    pub fn spawn_explosion<R: Rng + ?Sized>(
        &mut self,
        origin: Vec3,
        color: Vec4,
        count: u32,
        rng: &mut R,
    ) {
        for _ in 0..count {
            let velocity = Vec3::new(
                uniform(rng, -20.0, 20.0),
                uniform(rng, -20.0, 20.0),
                uniform(rng, -20.0, 20.0),
            );
            let size = uniform(rng, 2.0, 8.0);
            let life = uniform(rng, 1.0, 3.0);
            self.spawn(Particle::new(origin, velocity, color, size, life));
        }
    }

    /// Age every particle by `dt` seconds and reap the spent ones.
    pub fn update(&mut self, dt: f32) {
        let profile = self.config.decay;
        let damping = decay(profile.velocity_damping, dt, REFERENCE_DT);
        let shrink = decay(profile.size_decay, dt, REFERENCE_DT);

        for particle in self.slots.values_mut() {
            particle.position += particle.velocity * dt;
            particle.velocity *= damping;
            particle.life -= dt;
            particle.color.w = particle.life_fraction();
            particle.size *= shrink;
        }

        let min_size = profile.min_size;
        let before = self.slots.len();
        self.slots.retain(|_, p| !p.is_spent(min_size));
        if self.slots.len() != before {
            let slots = &self.slots;
            self.order.retain(|key| slots.contains_key(*key));
        }
    }

    /// Live particles, oldest first.
    pub fn active_particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.order.iter().filter_map(move |key| self.slots.get(*key))
    }

    pub fn get(&self, key: ParticleKey) -> Option<&Particle> {
        self.slots.get(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Particles dropped by the capacity limit since creation.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    const ORANGE: Vec4 = Vec4::new(1.0, 0.5, 0.0, 1.0);

    #[test]
    fn explosion_adds_exact_count_before_update() {
        let mut pool = ParticlePool::new(PoolConfig::explosion());
        let mut rng = seeded(1);
        pool.spawn_explosion(Vec3::new(3.0, 4.0, 5.0), ORANGE, 30, &mut rng);
        assert_eq!(pool.len(), 30);
        pool.spawn_explosion(Vec3::ZERO, ORANGE, 30, &mut rng);
        assert_eq!(pool.active_particles().count(), 60);
    }

    #[test]
    fn explosion_particles_sample_documented_ranges() {
        let mut pool = ParticlePool::new(PoolConfig::explosion());
        let mut rng = seeded(2);
        let origin = Vec3::new(-7.0, 1.0, 2.0);
        pool.spawn_explosion(origin, ORANGE, 200, &mut rng);
        for p in pool.active_particles() {
            assert_eq!(p.position, origin);
            assert!(p.velocity.abs().max_element() <= 20.0);
            assert!((2.0..8.0).contains(&p.size));
            assert!((1.0..3.0).contains(&p.life));
            assert_eq!(p.life, p.max_life);
            assert_eq!(p.color, ORANGE);
        }
    }

    #[test]
    fn life_decreases_linearly_then_particle_is_reaped() {
        let mut pool = ParticlePool::new(PoolConfig::explosion());
        let key = pool.spawn(Particle::new(Vec3::ZERO, Vec3::X, ORANGE, 5.0, 0.5));
        let dt = 0.1;
        for n in 1..5 {
            pool.update(dt);
            let p = pool.get(key).expect("particle still alive");
            assert!((p.life - (0.5 - n as f32 * dt)).abs() < 1e-5);
            assert!(p.life <= p.max_life && p.life >= 0.0);
        }
        pool.update(dt);
        pool.update(dt);
        assert!(pool.get(key).is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn alpha_tracks_remaining_life() {
        let mut pool = ParticlePool::new(PoolConfig::explosion());
        let key = pool.spawn(Particle::new(Vec3::ZERO, Vec3::ZERO, ORANGE, 5.0, 2.0));
        pool.update(0.5);
        let p = pool.get(key).unwrap();
        assert!((p.color.w - 0.75).abs() < 1e-5);
    }

    #[test]
    fn update_integrates_and_damps_velocity() {
        let mut pool = ParticlePool::new(PoolConfig::explosion());
        let key = pool.spawn(Particle::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), ORANGE, 4.0, 2.0));
        pool.update(REFERENCE_DT);
        let p = pool.get(key).unwrap();
        assert!((p.position.x - 10.0 * REFERENCE_DT).abs() < 1e-5);
        assert!((p.velocity.x - 9.8).abs() < 1e-4);
        assert!((p.size - 3.96).abs() < 1e-4);
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let mut pool = ParticlePool::new(PoolConfig::exhaust());
        let first = pool.spawn(Particle::new(Vec3::ZERO, Vec3::ZERO, ORANGE, 5.0, 1.0));
        let mut last = first;
        for i in 0..150 {
            last = pool.spawn(Particle::new(Vec3::splat(i as f32), Vec3::ZERO, ORANGE, 5.0, 1.0));
        }
        assert_eq!(pool.len(), 100);
        assert_eq!(pool.evicted(), 51);
        assert!(pool.get(first).is_none());
        assert!(pool.get(last).is_some());
        let oldest = pool.active_particles().next().unwrap();
        assert_eq!(oldest.position, Vec3::splat(50.0));
    }

    #[test]
    fn exhaust_profile_reaps_tiny_particles() {
        let mut pool = ParticlePool::new(PoolConfig::exhaust());
        pool.spawn(Particle::new(Vec3::ZERO, Vec3::ZERO, ORANGE, 0.1005, 10.0));
        pool.update(REFERENCE_DT);
        assert!(pool.is_empty());
    }

    #[test]
    fn zero_dt_update_changes_nothing() {
        let mut pool = ParticlePool::new(PoolConfig::explosion());
        let key = pool.spawn(Particle::new(Vec3::ONE, Vec3::X, ORANGE, 4.0, 1.0));
        let before = *pool.get(key).unwrap();
        pool.update(0.0);
        let after = pool.get(key).unwrap();
        assert_eq!(before.position, after.position);
        assert_eq!(before.size, after.size);
        assert_eq!(before.life, after.life);
    }

    #[test]
    fn config_validation() {
        assert!(PoolConfig::exhaust().validate("exhaust").is_ok());
        let zero = PoolConfig { capacity: 0, ..PoolConfig::explosion() };
        assert_eq!(
            zero.validate("explosions"),
            Err(ConfigError::ZeroCapacity { field: "explosions" })
        );
    }
}
