//! Core types and utilities shared by the flight simulation crates.
//!
//! - Vector and orientation algebra
//! - Euler transforms for streamed objects
//! - Frame timing and delta clamping
//! - Input intent, particle pools, the session random source
//! - Configuration errors

pub mod error;
pub mod intent;
pub mod math;
pub mod particles;
pub mod rng;
pub mod time;
pub mod transform;

pub use error::*;
pub use intent::*;
pub use math::*;
pub use particles::*;
pub use rng::{seeded, SimRng};
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
