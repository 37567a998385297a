//! Turns the post-tick scene into a renderer-agnostic draw list.

use renderer::{Camera, FrameSnapshot, MaterialUniforms, MeshDraw, MeshHandle, ParticleVertex};

use crate::scene::Scene;

/// Aim `camera` along the craft's view and collect everything visible this frame.
pub fn build_frame(scene: &Scene, camera: &mut Camera) -> FrameSnapshot {
    let basis = scene.craft().camera();
    camera.look(basis.position, basis.forward, basis.up);

    let mut frame = FrameSnapshot::new(camera.view_matrix(), camera.projection_matrix(), camera.position);

    frame.stars = scene
        .streamer()
        .stars()
        .map(|(_, star)| ParticleVertex::new(star.position, star.size, star.display_color()))
        .collect();

    frame.meshes = scene
        .streamer()
        .asteroids()
        .map(|(_, asteroid)| {
            let model = asteroid.transform().to_matrix();
            MeshDraw {
                mesh: MeshHandle::Asteroid,
                model,
                uniforms: MaterialUniforms::rock(&model, asteroid.color),
            }
        })
        .collect();

    frame.particles = scene
        .craft()
        .exhaust()
        .active_particles()
        .chain(scene.explosions().active_particles())
        .map(ParticleVertex::from)
        .collect();

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use engine_core::InputIntent;
    use glam::Vec3;

    #[test]
    fn frame_mirrors_scene_contents() {
        let mut scene = Scene::new(SimConfig::default()).unwrap();
        for _ in 0..10 {
            scene.advance(1.0 / 60.0, &InputIntent::thrust_forward());
        }
        let mut camera = Camera::new(1280, 720);
        let frame = build_frame(&scene, &mut camera);

        assert_eq!(frame.stars.len(), 500);
        assert_eq!(frame.meshes.len(), 30);
        assert_eq!(frame.particles.len(), scene.craft().exhaust().len() + scene.explosions().len());
        assert!(!frame.particles.is_empty());
        assert_eq!(frame.camera_position, scene.craft().position());
        assert!(frame.meshes.iter().all(|m| m.mesh == MeshHandle::Asteroid));
    }

    #[test]
    fn view_looks_along_craft_forward() {
        let scene = Scene::new(SimConfig::default()).unwrap();
        let mut camera = Camera::default();
        let frame = build_frame(&scene, &mut camera);
        let forward = scene.craft().camera().forward;
        let ahead = frame.view.transform_point3(frame.camera_position + forward * 5.0);
        assert!((ahead - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn asteroid_model_places_mesh_at_asteroid() {
        let scene = Scene::new(SimConfig::default()).unwrap();
        let frame = build_frame(&scene, &mut Camera::default());
        for (draw, (_, asteroid)) in frame.meshes.iter().zip(scene.streamer().asteroids()) {
            assert!((draw.model.w_axis.truncate() - asteroid.position).length() < 1e-4);
            assert_eq!(draw.uniforms.diffuse, asteroid.color);
        }
    }
}
