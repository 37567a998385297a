//! Procedural background: star and asteroid generation and the streamer that
//! keeps them populated around the craft.

pub mod objects;
pub mod streaming;

pub use objects::*;
pub use streaming::*;
