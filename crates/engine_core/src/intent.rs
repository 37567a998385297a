//! Per-tick control intent consumed by the craft.

use glam::Vec3;

/// Normalized input for one simulation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub boost: bool,
    pub brake: bool,
    /// Mouse-look yaw this tick (radians), subtracted from the craft's yaw.
    pub yaw_delta: f32,
    /// Mouse-look pitch this tick (radians), subtracted from the craft's pitch.
    pub pitch_delta: f32,
}

impl InputIntent {
    /// Intent with only forward thrust held.
    pub fn thrust_forward() -> Self {
        Self {
            forward: true,
            ..Default::default()
        }
    }

    /// Craft-local thrust direction before normalization.
    ///
    /// Forward is -Z, right is +X, up is +Y. Opposing inputs cancel.
    pub fn local_thrust(&self) -> Vec3 {
        let mut thrust = Vec3::ZERO;
        if self.forward {
            thrust.z -= 1.0;
        }
        if self.backward {
            thrust.z += 1.0;
        }
        if self.left {
            thrust.x -= 1.0;
        }
        if self.right {
            thrust.x += 1.0;
        }
        if self.up {
            thrust.y += 1.0;
        }
        if self.down {
            thrust.y -= 1.0;
        }
        thrust
    }

    /// True when any translational axis has a net non-zero input.
    pub fn has_thrust(&self) -> bool {
        self.local_thrust() != Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_thrust_axes() {
        assert_eq!(InputIntent::thrust_forward().local_thrust(), Vec3::new(0.0, 0.0, -1.0));
        let strafe = InputIntent {
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(strafe.local_thrust(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn opposing_inputs_cancel() {
        let intent = InputIntent {
            forward: true,
            backward: true,
            ..Default::default()
        };
        assert!(!intent.has_thrust());
        assert!(!InputIntent::default().has_thrust());
    }
}
