//! Keyboard and mouse state, folded into one [`InputIntent`] per tick.

use engine_core::InputIntent;
use glam::Vec2;
use std::collections::HashSet;

/// Radians of yaw/pitch per pixel of locked-cursor motion.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.002;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse movement delta for this frame.
    mouse_delta: Vec2,
    /// Motion received since the last `begin_frame`.
    accumulated_delta: Vec2,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state and take the motion accumulated since last frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_delta = std::mem::take(&mut self.accumulated_delta);
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process raw mouse motion. Ignored unless the cursor is locked.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.cursor_locked {
            return;
        }
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Set cursor lock state. Unlocking drops any motion not yet consumed.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        if self.cursor_locked != locked {
            log::debug!("Cursor {}", if locked { "locked" } else { "released" });
        }
        self.cursor_locked = locked;
        if !locked {
            self.accumulated_delta = Vec2::ZERO;
        }
    }

    /// Check if boost is held (Space).
    pub fn is_boosting(&self) -> bool {
        self.is_key_held(KeyCode::Space)
    }

    /// Check if brake is held (either Shift).
    pub fn is_braking(&self) -> bool {
        self.is_key_held(KeyCode::ShiftLeft) || self.is_key_held(KeyCode::ShiftRight)
    }

    /// Flight intent for this frame.
    ///
    /// W/S/A/D thrust forward/back/left/right, R/F up/down. Mouse look uses
    /// the delta taken by the last [`InputState::begin_frame`].
    pub fn intent(&self, sensitivity: f32) -> InputIntent {
        InputIntent {
            forward: self.is_key_held(KeyCode::KeyW),
            backward: self.is_key_held(KeyCode::KeyS),
            left: self.is_key_held(KeyCode::KeyA),
            right: self.is_key_held(KeyCode::KeyD),
            up: self.is_key_held(KeyCode::KeyR),
            down: self.is_key_held(KeyCode::KeyF),
            boost: self.is_boosting(),
            brake: self.is_braking(),
            yaw_delta: self.mouse_delta.x * sensitivity,
            pitch_delta: self.mouse_delta.y * sensitivity,
        }
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
