//! Broad-phase sphere overlap tests between the craft and streamed bodies.

use glam::Vec3;

/// One overlap found by [`check`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent<K> {
    /// Key of the body that was hit.
    pub key: K,
    /// Center of the body at the time of the test.
    pub position: Vec3,
    /// Center-to-center distance.
    pub distance: f32,
}

/// True when two spheres strictly overlap.
#[inline]
pub fn spheres_overlap(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Test the craft sphere against every `(key, center, radius)` body.
///
/// The result preserves the iteration order of `bodies`.
pub fn check<K, I>(craft_position: Vec3, craft_radius: f32, bodies: I) -> Vec<CollisionEvent<K>>
where
    I: IntoIterator<Item = (K, Vec3, f32)>,
{
    bodies
        .into_iter()
        .filter(|&(_, center, radius)| spheres_overlap(craft_position, craft_radius, center, radius))
        .map(|(key, center, _)| CollisionEvent {
            key,
            position: center,
            distance: craft_position.distance(center),
        })
        .collect()
}
