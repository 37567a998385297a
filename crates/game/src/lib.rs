//! Starflight simulation: one session of the craft flying through a streamed
//! star and asteroid field.

pub mod collisions;
pub mod config;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use config::SimConfig;
pub use render::build_frame;
pub use scene::{Scene, TickOutcome, TickStats};
pub use telemetry::Telemetry;
