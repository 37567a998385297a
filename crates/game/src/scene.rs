//! One flight session: the craft, the streamed field and the explosion pool.
//!
//! Tick order is fixed: craft, asteroid spin, streaming, collisions, then
//! particle aging. Nothing reads another component's half-updated state.

use engine_core::{clamp_delta, seeded, ConfigError, InputIntent, ParticlePool, SimRng};
use physics::CraftDynamics;
use procgen::{StreamStats, WorldStreamer};

use crate::collisions::{self, CollisionReport};
use crate::config::SimConfig;
use crate::telemetry::Telemetry;

/// What the driver should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// Health reached zero. Further `advance` calls do nothing until `reset`.
    GameOver,
}

/// Per-tick bookkeeping, mostly for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    pub dt: f32,
    pub stream: StreamStats,
    pub collisions: CollisionReport,
}

pub struct Scene {
    config: SimConfig,
    rng: SimRng,
    craft: CraftDynamics,
    streamer: WorldStreamer,
    explosions: ParticlePool,
    game_over: bool,
    ticks: u64,
    elapsed: f32,
    last_tick: TickStats,
}

impl Scene {
    /// Validate `config` and start a session with a freshly seeded field.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = seeded(config.seed);
        let craft = CraftDynamics::new(config.craft)?;
        let mut streamer = WorldStreamer::new(config.stream)?;
        streamer.seed(craft.position(), &mut rng);
        log::info!("Session started with seed {:#x}", config.seed);

        Ok(Self {
            explosions: ParticlePool::new(config.explosions),
            config,
            rng,
            craft,
            streamer,
            game_over: false,
            ticks: 0,
            elapsed: 0.0,
            last_tick: TickStats::default(),
        })
    }

    /// Run one tick of `dt` seconds under `intent`.
    pub fn advance(&mut self, dt: f32, intent: &InputIntent) -> TickOutcome {
        if self.game_over {
            return TickOutcome::GameOver;
        }
        let dt = clamp_delta(dt, self.config.max_delta);

        let update = self.craft.update(dt, intent, &mut self.rng);
        self.streamer.spin_asteroids(dt);
        let stream = self.streamer.update(update.position, &mut self.rng);

        let events = collisions::detect(&self.craft, &self.streamer);
        let report = collisions::resolve(
            &events,
            &mut self.craft,
            &mut self.streamer,
            &mut self.explosions,
            &mut self.rng,
        );

        self.craft.age_exhaust(dt);
        self.explosions.update(dt);

        self.ticks += 1;
        self.elapsed += dt;
        self.last_tick = TickStats {
            dt,
            stream,
            collisions: report,
        };

        if self.craft.is_destroyed() {
            self.game_over = true;
            log::warn!(
                "Game over after {} ticks ({:.1}s), health {}",
                self.ticks,
                self.elapsed,
                self.craft.health()
            );
            return TickOutcome::GameOver;
        }
        TickOutcome::Running
    }

    /// Start over from the configured seed.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        *self = Self::new(self.config.clone())?;
        Ok(())
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry::from_craft(&self.craft)
    }

    pub fn craft(&self) -> &CraftDynamics {
        &self.craft
    }

    pub fn streamer(&self) -> &WorldStreamer {
        &self.streamer
    }

    pub fn explosions(&self) -> &ParticlePool {
        &self.explosions
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds since the session started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn last_tick(&self) -> &TickStats {
        &self.last_tick
    }

    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut CraftDynamics, &mut WorldStreamer, &mut ParticlePool) {
        (&mut self.craft, &mut self.streamer, &mut self.explosions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn scene() -> Scene {
        Scene::new(SimConfig::default()).unwrap()
    }

    fn cruise() -> InputIntent {
        InputIntent { boost: true, yaw_delta: 0.002, ..InputIntent::thrust_forward() }
    }

    #[test]
    fn new_scene_is_populated_and_at_rest() {
        let s = scene();
        assert_eq!(s.streamer().star_count(), 500);
        assert_eq!(s.streamer().asteroid_count(), 30);
        assert_eq!(s.craft().position(), Vec3::ZERO);
        assert_eq!(s.telemetry().health, 100.0);
        assert!(s.explosions().is_empty());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let mut config = SimConfig::default();
        config.craft.max_speed = 0.0;
        assert!(matches!(
            Scene::new(config),
            Err(ConfigError::NotPositive { field: "max_speed", .. })
        ));
    }

    #[test]
    fn flying_keeps_invariants() {
        let mut s = scene();
        let intent = cruise();
        for _ in 0..600 {
            if s.advance(1.0 / 60.0, &intent) == TickOutcome::GameOver {
                break;
            }
            let t = s.telemetry();
            assert!(t.speed <= t.max_speed + 1e-3);
            assert!(s.craft().exhaust().len() <= 100);
            assert!(s.streamer().star_count() <= 500);
            assert!(s.streamer().asteroid_count() <= 30);
        }
        assert!(s.craft().position().length() > 10.0);
    }

    #[test]
    fn health_never_recovers() {
        let mut s = scene();
        let intent = cruise();
        let mut last = s.telemetry().health;
        let mut hits = 0;
        for tick in 0..900 {
            // Park a rock on the craft every 150 ticks.
            if tick % 150 == 0 {
                let (craft, streamer, _) = s.parts_mut();
                let position = craft.position();
                let (key, _) = streamer.asteroids().next().unwrap();
                streamer.asteroid_mut(key).unwrap().position = position;
            }
            let outcome = s.advance(1.0 / 30.0, &intent);
            hits += s.last_tick().collisions.hits;
            let health = s.telemetry().health;
            if tick % 150 == 0 {
                assert!(health <= last - 10.0, "tick {tick}: {health} after {last}");
            } else {
                assert!(health <= last);
            }
            last = health;
            if outcome == TickOutcome::GameOver {
                break;
            }
        }
        assert!(hits > 0);
        assert!(last <= 40.0);
    }

    #[test]
    fn oversized_and_bad_deltas_are_clamped() {
        let mut s = scene();
        s.advance(5.0, &InputIntent::default());
        assert_eq!(s.last_tick().dt, 0.1);
        s.advance(f32::NAN, &InputIntent::default());
        assert_eq!(s.last_tick().dt, 0.0);
        s.advance(-1.0, &InputIntent::default());
        assert_eq!(s.last_tick().dt, 0.0);
        assert!((s.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn collision_inside_tick_spawns_explosion() {
        let mut s = scene();
        let key = {
            let (craft, streamer, _) = s.parts_mut();
            let position = craft.position();
            let (key, _) = streamer.asteroids().next().unwrap();
            streamer.asteroid_mut(key).unwrap().position = position + Vec3::X;
            key
        };

        assert_eq!(s.advance(1.0 / 60.0, &InputIntent::default()), TickOutcome::Running);
        let report = s.last_tick().collisions;
        assert_eq!(report.hits, 1);
        assert_eq!(s.telemetry().health, 90.0);
        assert_eq!(s.explosions().len(), 30);
        assert!(s.streamer().asteroid(key).is_none());
        assert_eq!(s.streamer().asteroid_count(), 29);

        s.advance(1.0 / 60.0, &InputIntent::default());
        assert_eq!(s.streamer().asteroid_count(), 30);
    }

    #[test]
    fn game_over_freezes_the_session() {
        let mut s = scene();
        s.parts_mut().0.apply_damage(100.0);
        assert_eq!(s.advance(1.0 / 60.0, &cruise()), TickOutcome::GameOver);
        assert!(s.is_game_over());

        let ticks = s.ticks();
        let position = s.craft().position();
        assert_eq!(s.advance(1.0 / 60.0, &cruise()), TickOutcome::GameOver);
        assert_eq!(s.ticks(), ticks);
        assert_eq!(s.craft().position(), position);

        s.reset().unwrap();
        assert!(!s.is_game_over());
        assert_eq!(s.telemetry().health, 100.0);
        assert_eq!(s.advance(1.0 / 60.0, &cruise()), TickOutcome::Running);
    }

    #[test]
    fn same_seed_same_flight() {
        let mut a = scene();
        let mut b = scene();
        let intent = cruise();
        for _ in 0..300 {
            a.advance(1.0 / 60.0, &intent);
            b.advance(1.0 / 60.0, &intent);
        }
        assert_eq!(a.craft().position(), b.craft().position());
        assert_eq!(a.telemetry(), b.telemetry());
        let pa: Vec<Vec3> = a.streamer().asteroids().map(|(_, r)| r.position).collect();
        let pb: Vec<Vec3> = b.streamer().asteroids().map(|(_, r)| r.position).collect();
        assert_eq!(pa, pb);
    }
}
