//! World streaming: keeps a bounded field of stars and asteroids around a moving point.
//!
//! Each update culls everything farther than the cull radius from the
//! reference point, then tops each collection back up to its target count
//! by spawning on a horizontal ring around the reference. Spawn positions are
//! kept inside the cull sphere so nothing pops out on the following pass.

use engine_core::error::{ensure_positive, ensure_range, ConfigError};
use engine_core::rng::uniform;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::f32::consts::TAU;

use crate::objects::{Asteroid, Star};

new_key_type! {
    /// Handle to a streamed star.
    pub struct StarKey;
    /// Handle to a streamed asteroid.
    pub struct AsteroidKey;
}

/// Candidates drawn before a spawn is pulled onto the cull sphere.
const MAX_SPAWN_ATTEMPTS: usize = 8;

/// Horizontal ring (plus vertical slab) that new objects spawn in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRing {
    /// Horizontal distance from the reference point, `[min, max)`.
    pub min_distance: f32,
    pub max_distance: f32,
    /// Vertical offset is drawn from `[-half_height, half_height)`.
    pub half_height: f32,
}

impl SpawnRing {
    fn validate(&self, field: &'static str, cull_radius: f32) -> Result<(), ConfigError> {
        ensure_range(field, self.min_distance, self.max_distance)?;
        if self.half_height < 0.0 {
            return Err(ConfigError::InvalidRange {
                field,
                min: -self.half_height,
                max: self.half_height,
            });
        }
        if self.max_distance > cull_radius {
            return Err(ConfigError::SpawnBeyondCull {
                field,
                max: self.max_distance,
                cull_radius,
            });
        }
        Ok(())
    }

    /// Draw an offset from the reference point that lies within `cull_radius`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, cull_radius: f32) -> Vec3 {
        let mut offset = Vec3::ZERO;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let angle = uniform(rng, 0.0, TAU);
            let distance = uniform(rng, self.min_distance, self.max_distance);
            let height = uniform(rng, -self.half_height, self.half_height);
            offset = Vec3::new(angle.cos() * distance, height, angle.sin() * distance);
            if offset.length() <= cull_radius {
                return offset;
            }
        }
        offset * (cull_radius / offset.length())
    }
}

/// Densities and radii for the streamed field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub star_target: usize,
    pub asteroid_target: usize,
    pub star_cull_radius: f32,
    pub asteroid_cull_radius: f32,
    pub star_ring: SpawnRing,
    pub asteroid_ring: SpawnRing,
    /// Asteroids seeded closer than this to the start point are pushed out.
    pub seed_clearance: f32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            star_target: 500,
            asteroid_target: 30,
            star_cull_radius: 500.0,
            asteroid_cull_radius: 500.0,
            star_ring: SpawnRing {
                min_distance: 100.0,
                max_distance: 500.0,
                half_height: 100.0,
            },
            asteroid_ring: SpawnRing {
                min_distance: 50.0,
                max_distance: 350.0,
                half_height: 50.0,
            },
            seed_clearance: 50.0,
        }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("star_cull_radius", self.star_cull_radius)?;
        ensure_positive("asteroid_cull_radius", self.asteroid_cull_radius)?;
        self.star_ring.validate("star_ring", self.star_cull_radius)?;
        self.asteroid_ring.validate("asteroid_ring", self.asteroid_cull_radius)?;
        if self.seed_clearance < 0.0 || self.seed_clearance * 2.0 > self.asteroid_cull_radius {
            return Err(ConfigError::InvalidRange {
                field: "seed_clearance",
                min: self.seed_clearance,
                max: self.asteroid_cull_radius,
            });
        }
        Ok(())
    }
}

/// What one streaming pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub stars_culled: usize,
    pub stars_spawned: usize,
    pub asteroids_culled: usize,
    pub asteroids_spawned: usize,
}

impl StreamStats {
    pub fn is_quiet(&self) -> bool {
        *self == Self::default()
    }
}

/// Owns the live stars and asteroids.
#[derive(Debug, Clone)]
pub struct WorldStreamer {
    config: StreamConfig,
    stars: SlotMap<StarKey, Star>,
    asteroids: SlotMap<AsteroidKey, Asteroid>,
}

impl WorldStreamer {
    /// Empty streamer. Call [`WorldStreamer::seed`] before the first tick.
    pub fn new(config: StreamConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            stars: SlotMap::with_capacity_and_key(config.star_target),
            asteroids: SlotMap::with_capacity_and_key(config.asteroid_target),
        })
    }

    /// Populate the field around `origin`, keeping asteroids clear of the start point.
    pub fn seed<R: Rng + ?Sized>(&mut self, origin: Vec3, rng: &mut R) {
        self.stars.clear();
        self.asteroids.clear();
        self.update(origin, rng);

        let clearance = self.config.seed_clearance;
        let mut pushed = 0;
        for asteroid in self.asteroids.values_mut() {
            let offset = asteroid.position - origin;
            if offset.length() < clearance {
                let dir = offset.try_normalize().unwrap_or(Vec3::X);
                asteroid.position = origin + dir * (clearance + uniform(rng, 0.0, clearance));
                pushed += 1;
            }
        }
        log::info!(
            "Seeded {} stars and {} asteroids around {:?} ({} pushed clear)",
            self.stars.len(),
            self.asteroids.len(),
            origin,
            pushed
        );
    }

    /// Cull objects beyond the cull radius of `reference`, then spawn back up to target.
    pub fn update<R: Rng + ?Sized>(&mut self, reference: Vec3, rng: &mut R) -> StreamStats {
        let mut stats = StreamStats::default();

        let star_radius = self.config.star_cull_radius;
        let before = self.stars.len();
        self.stars.retain(|_, s| s.position.distance(reference) <= star_radius);
        stats.stars_culled = before - self.stars.len();

        let asteroid_radius = self.config.asteroid_cull_radius;
        let before = self.asteroids.len();
        self.asteroids.retain(|_, a| a.position.distance(reference) <= asteroid_radius);
        stats.asteroids_culled = before - self.asteroids.len();

        while self.stars.len() < self.config.star_target {
            let offset = self.config.star_ring.sample(rng, star_radius);
            self.stars.insert(Star::random(reference + offset, rng));
            stats.stars_spawned += 1;
        }

        while self.asteroids.len() < self.config.asteroid_target {
            let offset = self.config.asteroid_ring.sample(rng, asteroid_radius);
            self.asteroids.insert(Asteroid::random(reference + offset, rng));
            stats.asteroids_spawned += 1;
        }

        if !stats.is_quiet() {
            log::debug!("Streaming around {:?}: {:?}", reference, stats);
        }
        stats
    }

    /// Tumble every asteroid by `dt` seconds.
    pub fn spin_asteroids(&mut self, dt: f32) {
        for asteroid in self.asteroids.values_mut() {
            asteroid.spin(dt);
        }
    }

    pub fn remove_asteroid(&mut self, key: AsteroidKey) -> Option<Asteroid> {
        self.asteroids.remove(key)
    }

    pub fn asteroid(&self, key: AsteroidKey) -> Option<&Asteroid> {
        self.asteroids.get(key)
    }

    pub fn asteroid_mut(&mut self, key: AsteroidKey) -> Option<&mut Asteroid> {
        self.asteroids.get_mut(key)
    }

    pub fn stars(&self) -> impl Iterator<Item = (StarKey, &Star)> + '_ {
        self.stars.iter()
    }

    pub fn asteroids(&self) -> impl Iterator<Item = (AsteroidKey, &Asteroid)> + '_ {
        self.asteroids.iter()
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }
}
