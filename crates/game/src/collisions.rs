//! Craft vs asteroid collision handling.

use engine_core::ParticlePool;
use glam::Vec4;
use physics::{CollisionEvent, CraftDynamics};
use procgen::{AsteroidKey, WorldStreamer};
use rand::Rng;

/// Health lost per asteroid hit.
pub const COLLISION_DAMAGE: f32 = 10.0;
pub const EXPLOSION_COLOR: Vec4 = Vec4::new(1.0, 0.5, 0.0, 1.0);
pub const EXPLOSION_PARTICLES: u32 = 30;

/// Result of resolving one tick's collisions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionReport {
    pub hits: usize,
    pub damage: f32,
    /// Health reached zero or below during this resolution.
    pub game_over: bool,
}

/// Overlaps between the craft and live asteroids, in streamer iteration order.
pub fn detect(craft: &CraftDynamics, streamer: &WorldStreamer) -> Vec<CollisionEvent<AsteroidKey>> {
    physics::collision::check(
        craft.position(),
        craft.radius(),
        streamer.asteroids().map(|(key, a)| (key, a.position, a.scale)),
    )
}

/// Apply every event: damage, an explosion at the asteroid, and its removal.
///
/// Events are handled independently, so several hits in one tick stack their damage.
pub fn resolve<R: Rng + ?Sized>(
    events: &[CollisionEvent<AsteroidKey>],
    craft: &mut CraftDynamics,
    streamer: &mut WorldStreamer,
    explosions: &mut ParticlePool,
    rng: &mut R,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    for event in events {
        if streamer.remove_asteroid(event.key).is_none() {
            continue;
        }
        craft.apply_damage(COLLISION_DAMAGE);
        explosions.spawn_explosion(event.position, EXPLOSION_COLOR, EXPLOSION_PARTICLES, rng);
        report.hits += 1;
        report.damage += COLLISION_DAMAGE;
        log::info!(
            "Asteroid hit at {:?} (distance {:.2}), health {}",
            event.position,
            event.distance,
            craft.health()
        );
    }
    report.game_over = report.hits > 0 && craft.is_destroyed();
    report
}
