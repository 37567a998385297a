//! Session configuration. Loaded from `starflight.ron` at startup.

use engine_core::error::{ensure_positive, ConfigError};
use engine_core::{PoolConfig, DEFAULT_MAX_DELTA};
use input::DEFAULT_MOUSE_SENSITIVITY;
use physics::CraftConfig;
use procgen::StreamConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "starflight.ron";

/// Everything a [`crate::Scene`] needs to start a session, plus demo-driver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the session's random source.
    pub seed: u64,
    /// Largest simulation step in seconds.
    pub max_delta: f32,
    /// Radians per pixel of locked-cursor motion.
    pub mouse_sensitivity: f32,
    pub craft: CraftConfig,
    pub stream: StreamConfig,
    pub explosions: PoolConfig,
    /// Ticks the headless driver runs before exiting.
    pub demo_ticks: u32,
    /// Simulated frame length for the headless driver. Zero runs on the wall clock.
    pub demo_dt: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            max_delta: DEFAULT_MAX_DELTA,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            craft: CraftConfig::default(),
            stream: StreamConfig::default(),
            explosions: PoolConfig::explosion(),
            demo_ticks: 1800,
            demo_dt: 1.0 / 60.0,
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl SimConfig {
    /// Load config from `starflight.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            },
            Err(e) => log::info!("No config at {:?} ({}), using defaults", path, e),
        }
        Self::default()
    }

    /// Write the config to `path` as pretty RON. Logs on error.
    pub fn save_to(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    /// Check every nested section. [`crate::Scene::new`] calls this before building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("max_delta", self.max_delta)?;
        ensure_positive("mouse_sensitivity", self.mouse_sensitivity)?;
        self.craft.validate()?;
        self.stream.validate()?;
        self.explosions.validate("explosions")
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("starflight-{}-{}.ron", name, std::process::id()))
    }

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.craft.max_speed, 50.0);
        assert_eq!(config.stream.star_target, 500);
        assert_eq!(config.explosions.capacity, 2000);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, "(seed: 42, craft: (max_speed: 80.0))").unwrap();
        let config = SimConfig::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(config.seed, 42);
        assert_eq!(config.craft.max_speed, 80.0);
        assert_eq!(config.craft.thrust_power, 30.0);
        assert_eq!(config.stream, StreamConfig::default());
    }

    #[test]
    fn malformed_or_missing_file_falls_back_to_defaults() {
        let path = temp_path("broken");
        std::fs::write(&path, "(seed: \"not a number\"").unwrap();
        assert_eq!(SimConfig::load_from(&path), SimConfig::default());
        std::fs::remove_file(&path).ok();
        assert_eq!(SimConfig::load_from(&temp_path("missing")), SimConfig::default());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let path = temp_path("saved");
        let mut config = SimConfig::default();
        config.seed = 9;
        config.stream.asteroid_target = 12;
        config.save_to(&path);
        let loaded = SimConfig::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn rejects_bad_nested_sections() {
        let mut config = SimConfig::default();
        config.craft.mass = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive { field: "mass", .. })));

        let mut config = SimConfig::default();
        config.max_delta = -1.0;
        assert!(config.validate().is_err());
    }
}
