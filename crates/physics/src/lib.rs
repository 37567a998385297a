//! Flight physics for the player craft and broad-phase collision tests.

pub mod collision;
pub mod craft;

pub use collision::*;
pub use craft::*;
