//! Frame timing for the simulation driver.

use std::time::Instant;

/// Tick length the per-tick decay constants were tuned for (60 Hz).
pub const REFERENCE_DT: f32 = 1.0 / 60.0;

/// Largest frame delta fed into the simulation (seconds).
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Clamp a driver-supplied delta into `[0, max_delta]`. Non-finite input becomes zero.
pub fn clamp_delta(dt: f32, max_delta: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(max_delta)
}

/// Measures wall-clock frame deltas and hands out clamped simulation steps.
#[derive(Debug)]
pub struct FrameClock {
    /// Time when the clock started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Frames ticked since start.
    frame_count: u64,
    /// Upper bound on the simulation step.
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            frame_count: 0,
            max_delta,
        }
    }

    /// Mark the start of a new frame and return the clamped step in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let dt = clamp_delta(raw, self.max_delta);
        if dt < raw {
            log::debug!("frame delta {:.3}s clamped to {:.3}s", raw, dt);
        }
        dt
    }

    /// Total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        (self.last_frame - self.start_time).as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clamp_delta_bounds() {
        assert_eq!(clamp_delta(0.016, 0.1), 0.016);
        assert_eq!(clamp_delta(2.5, 0.1), 0.1);
        assert_eq!(clamp_delta(-1.0, 0.1), 0.0);
        assert_eq!(clamp_delta(f32::NAN, 0.1), 0.0);
        assert_eq!(clamp_delta(f32::INFINITY, 0.1), 0.0);
    }

    #[test]
    fn clock_never_exceeds_max_delta() {
        let mut clock = FrameClock::new(0.05);
        std::thread::sleep(Duration::from_millis(60));
        let dt = clock.tick();
        assert!(dt <= 0.05);
        assert_eq!(clock.frame_count(), 1);
    }
}
