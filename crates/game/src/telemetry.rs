//! Read-only flight readouts for the HUD.

use glam::Vec3;
use physics::CraftDynamics;
use std::fmt;

/// Snapshot of the craft taken after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub speed: f32,
    pub health: f32,
    pub position: Vec3,
    pub max_speed: f32,
    pub max_health: f32,
}

impl Telemetry {
    pub fn from_craft(craft: &CraftDynamics) -> Self {
        Self {
            speed: craft.speed(),
            health: craft.health(),
            position: craft.position(),
            max_speed: craft.config().max_speed,
            max_health: craft.config().max_health,
        }
    }

    /// Speed as a percentage of max speed, capped at 100.
    pub fn speed_percent(&self) -> f32 {
        (self.speed / self.max_speed * 100.0).min(100.0)
    }

    /// Health as a percentage, floored at 0 for display.
    pub fn health_percent(&self) -> f32 {
        (self.health / self.max_health * 100.0).max(0.0)
    }

    /// Speed, health and position components rounded to whole units.
    pub fn rounded(&self) -> (i32, i32, [i32; 3]) {
        let p = self.position.round();
        (
            self.speed.round() as i32,
            self.health.round() as i32,
            [p.x as i32, p.y as i32, p.z as i32],
        )
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (speed, health, [x, y, z]) = self.rounded();
        write!(
            f,
            "speed {} ({:.0}%) | health {} | pos ({}, {}, {})",
            speed,
            self.speed_percent(),
            health,
            x,
            y,
            z
        )
    }
}
