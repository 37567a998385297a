//! Backend-independent rendering: camera matrices, mesh primitives, vertex
//! records and the per-frame draw list.

pub mod camera;
pub mod frame;
pub mod mesh;
pub mod vertex;

pub use camera::*;
pub use frame::*;
pub use mesh::*;
pub use vertex::*;
