//! Starflight - headless flight demo. Flies a scripted pilot through the
//! streamed field and logs telemetry and draw statistics.

use anyhow::{Context, Result};
use engine_core::FrameClock;
use game::{build_frame, Scene, SimConfig, TickOutcome};
use input::{ElementState, InputState, KeyCode};
use renderer::{
    submit, upload_meshes, Camera, CameraUniform, Light, MeshData, MeshDraw, MeshHandle, MeshUniformsRaw,
    ParticleVertex, RenderBackend,
};
use std::collections::HashSet;

/// Backend that records what a GPU backend would have been asked to draw.
#[derive(Default)]
struct StatsBackend {
    meshes: HashSet<MeshHandle>,
    uploaded_bytes: usize,
    mesh_draws: u64,
    /// Per-draw uniform bytes a GPU backend would have written.
    uniform_bytes: usize,
    particle_batches: u64,
    particles: u64,
    frames: u64,
}

impl RenderBackend for StatsBackend {
    fn upload_mesh(&mut self, handle: MeshHandle, data: &MeshData) {
        self.uploaded_bytes += data.vertex_bytes().len() + data.index_bytes().len();
        self.meshes.insert(handle);
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::info!("Viewport {}x{}", width, height);
    }

    fn clear(&mut self, _color: glam::Vec4) {
        self.frames += 1;
    }

    fn draw_mesh(&mut self, _camera: &CameraUniform, _light: &Light, draw: &MeshDraw) {
        if !self.meshes.contains(&draw.mesh) {
            log::warn!("Draw of {:?} before upload", draw.mesh);
        }
        let raw = MeshUniformsRaw::from(draw);
        self.uniform_bytes += bytemuck::bytes_of(&raw).len();
        self.mesh_draws += 1;
    }

    fn draw_particles(&mut self, _camera: &CameraUniform, particles: &[ParticleVertex]) {
        self.particle_batches += 1;
        self.particles += particles.len() as u64;
    }
}

/// Keys held and mouse motion per tick for one scripted phase.
struct Phase {
    keys: &'static [KeyCode],
    motion: (f64, f64),
}

const PHASE_TICKS: u32 = 240;

const SCRIPT: [Phase; 5] = [
    Phase { keys: &[KeyCode::KeyW], motion: (0.0, 0.0) },
    Phase { keys: &[KeyCode::KeyW, KeyCode::Space], motion: (3.0, 0.0) },
    Phase { keys: &[KeyCode::KeyW, KeyCode::KeyR], motion: (0.0, -2.0) },
    Phase { keys: &[KeyCode::ShiftLeft], motion: (0.0, 0.0) },
    Phase { keys: &[KeyCode::KeyD, KeyCode::KeyF, KeyCode::Space], motion: (-4.0, 1.0) },
];

const PILOT_KEYS: [KeyCode; 7] = [
    KeyCode::KeyW,
    KeyCode::KeyD,
    KeyCode::KeyR,
    KeyCode::KeyF,
    KeyCode::Space,
    KeyCode::ShiftLeft,
    KeyCode::ShiftRight,
];

fn feed_pilot(input: &mut InputState, tick: u32) {
    let phase = &SCRIPT[(tick / PHASE_TICKS) as usize % SCRIPT.len()];
    for key in PILOT_KEYS {
        let state = if phase.keys.contains(&key) { ElementState::Pressed } else { ElementState::Released };
        if input.is_key_held(key) != (state == ElementState::Pressed) {
            input.process_keyboard(key, state);
        }
    }
    input.process_mouse_motion(phase.motion);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::load();
    let ticks = config.demo_ticks;
    let fixed_dt = config.demo_dt;
    let mut clock = FrameClock::new(config.max_delta);
    let sensitivity = config.mouse_sensitivity;
    let (width, height) = (config.window_width, config.window_height);

    if fixed_dt > 0.0 {
        log::info!("Starting Starflight headless run: {} ticks at {:.4}s", ticks, fixed_dt);
    } else {
        log::info!("Starting Starflight headless run: {} ticks on the wall clock", ticks);
    }

    let mut scene = Scene::new(config).context("invalid simulation config")?;
    let mut camera = Camera::new(width, height);
    let mut backend = StatsBackend::default();
    backend.resize(width, height);
    upload_meshes(&mut backend);
    log::info!("Uploaded {} meshes ({} bytes)", backend.meshes.len(), backend.uploaded_bytes);

    let mut input = InputState::new();
    input.set_cursor_locked(true);

    for tick in 0..ticks {
        feed_pilot(&mut input, tick);
        input.begin_frame();
        let intent = input.intent(sensitivity);

        let wall_dt = clock.tick();
        let dt = if fixed_dt > 0.0 { fixed_dt } else { wall_dt };
        let outcome = scene.advance(dt, &intent);
        let frame = build_frame(&scene, &mut camera);
        submit(&mut backend, &frame);

        if tick % 120 == 0 {
            log::info!(
                "[tick {}] {} | {} draw calls",
                tick,
                scene.telemetry(),
                frame.draw_call_count()
            );
        }
        if outcome == TickOutcome::GameOver {
            println!("Game Over! {}", scene.telemetry());
            break;
        }
    }

    println!(
        "Flew {:.1}s over {} frames: {} mesh draws, {} particle batches ({} particles), {} explosions live",
        scene.elapsed(),
        backend.frames,
        backend.mesh_draws,
        backend.particle_batches,
        backend.particles,
        scene.explosions().len()
    );
    println!("Final: {}", scene.telemetry());
    log::info!(
        "{} frames in {:.2}s wall time, {} uniform bytes, {} exhaust particles evicted",
        clock.frame_count(),
        clock.elapsed_seconds(),
        backend.uniform_bytes,
        scene.craft().exhaust().evicted()
    );
    Ok(())
}
